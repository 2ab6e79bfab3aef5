use rand::seq::SliceRandom;

use super::Joke;
use crate::translate::Language;

pub const DEFAULT_JOKE: &str = "Why did the programmer quit his job? Because he didn't get arrays!";

const HINDI_JOKES: &[&str] = &[
    "टीचर: तुम्हारा होमवर्क कहाँ है?\nस्टूडेंट: वो कुत्ता खा गया।\nटीचर: बकवास मत करो!\nस्टूडेंट: सच में मैडम, मैंने लिखा था की 2+2=5, तो कुत्ते ने सोचा गलत है और खा गया!",
    "पति (फोन पर): डार्लिंग, मैं तुम्हें एक बुरी खबर और एक अच्छी खबर देना चाहता हूं।\nपत्नी: पहले अच्छी खबर बताओ।\nपति: एयरबैग काम कर रहा था!",
    "डॉक्टर: आपको रोज सुबह उठकर एक गिलास गरम पानी पीना है।\nमरीज: मैं पिछले 6 महीने से यही कर रहा हूं।\nडॉक्टर: फिर क्या हुआ?\nमरीज: अब बाथरूम में बाल्टी नहीं भरती।",
    "संता: यार तुम इतने मोटे कैसे हो गए?\nबंता: मैं गूगल पर सर्च करता हूं।\nसंता: वो कैसे?\nबंता: हर बार गूगल कहता है कि कुकीज़ को एक्सेप्ट करो!",
    "पप्पू: डॉक्टर साहब, मैं सो नहीं पाता।\nडॉक्टर: क्यों?\nपप्पू: रात को नींद आ जाती है।",
    "टीचर: बताओ, दुनिया का सबसे बुद्धिमान जानवर कौन है?\nस्टूडेंट: मछली!\nटीचर: वो कैसे?\nस्टूडेंट: क्योंकि वो कभी अपना मुंह नहीं खोलती!",
];

const ENGLISH_JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "What did the JSON say to the JavaScript? You complete me!",
    "Why do programmers always mix up Halloween and Christmas? Because Oct 31 equals Dec 25!",
    "Why did the programmer go broke? Because he used up all his cache!",
    "What's a programmer's favorite place in the house? The function room!",
    "Why did the developer quit his job? Because he didn't get arrays!",
];

pub fn pool(language: Language) -> &'static [&'static str] {
    match language {
        Language::Hindi => HINDI_JOKES,
        Language::English => ENGLISH_JOKES,
    }
}

/// Up to `count` distinct built-in jokes in random order.
pub fn backup_jokes(count: usize, language: Language) -> Vec<Joke> {
    pool(language)
        .choose_multiple(&mut rand::thread_rng(), count)
        .map(|joke| Joke::new(*joke))
        .collect()
}
