use crate::jokes::Joke;
use crate::translate::Language;

/// Labels that change with the page language.
pub struct PageLabels {
    pub toggle: &'static str,
    pub new_jokes: &'static str,
    pub loading: &'static str,
}

pub fn labels(language: Language) -> PageLabels {
    match language {
        Language::Hindi => PageLabels {
            toggle: "🇬🇧 Show in English",
            new_jokes: "नए जोक्स दिखाएं",
            loading: "नए जोक्स लोड हो रहे हैं...",
        },
        Language::English => PageLabels {
            toggle: "🇮🇳 हिंदी में दिखाएं",
            new_jokes: "Get New Jokes",
            loading: "Loading new jokes...",
        },
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn joke_item(joke: &Joke) -> String {
    let body = escape_html(&joke.joke).replace('\n', "<br>");
    format!(
        r#"<div class="joke-item"><div class="joke-body">{}</div></div>"#,
        body
    )
}

/// Full page for `language`. The toggle reloads the page in the other language;
/// the button asks for a fresh batch in the current one.
pub fn render(language: Language, jokes: &[Joke]) -> String {
    let labels = labels(language);
    let items: String = jokes.iter().map(joke_item).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Jokes</title>
<style>
body {{ font-family: sans-serif; background: #f5f6fa; margin: 0; padding: 24px; }}
.container {{ max-width: 720px; margin: 0 auto; }}
.joke-item {{ margin-bottom: 25px; padding: 20px; background: #ffffff; border-radius: 12px; box-shadow: 0 3px 10px rgba(0,0,0,0.1); }}
.joke-body {{ font-size: 1.2em; color: #2d3436; line-height: 1.6; }}
.actions {{ display: flex; justify-content: space-between; margin-bottom: 20px; }}
</style>
</head>
<body>
<div class="container">
<div class="actions">
<a id="language-toggle" href="/?lang={other}"><span class="lang-text">{toggle}</span></a>
<a id="get-joke-btn" href="/?lang={lang}" data-loading="{loading}">{new_jokes}</a>
</div>
<div id="joke-text"><div class="jokes-container">{items}</div></div>
</div>
</body>
</html>
"#,
        lang = language.code(),
        other = language.toggled().code(),
        toggle = labels.toggle,
        loading = escape_html(labels.loading),
        new_jokes = labels.new_jokes,
        items = items,
    )
}
