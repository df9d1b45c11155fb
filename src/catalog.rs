use crate::models::FlashcardEntry;

/// Level filter choices, in the order the filter key cycles through them.
pub const LEVELS: [&str; 3] = ["N5", "N4", "N3"];

// (japanese, romaji, english, category). Each level carries at least 10
// entries so test mode is reachable without any user-submitted cards.
const WORDS: &[(&str, &str, &str, &str)] = &[
    ("水", "mizu", "water", "N5"),
    ("犬", "inu", "dog", "N5"),
    ("猫", "neko", "cat", "N5"),
    ("本", "hon", "book", "N5"),
    ("学校", "gakkou", "school", "N5"),
    ("先生", "sensei", "teacher", "N5"),
    ("友達", "tomodachi", "friend", "N5"),
    ("朝", "asa", "morning", "N5"),
    ("駅", "eki", "station", "N5"),
    ("食べる", "taberu", "to eat", "N5"),
    ("飲む", "nomu", "to drink", "N5"),
    ("行く", "iku", "to go", "N5"),
    ("経験", "keiken", "experience", "N4"),
    ("説明", "setsumei", "explanation", "N4"),
    ("準備", "junbi", "preparation", "N4"),
    ("予定", "yotei", "plan", "N4"),
    ("会議", "kaigi", "meeting", "N4"),
    ("案内", "annai", "guidance", "N4"),
    ("招待", "shoutai", "invitation", "N4"),
    ("届く", "todoku", "to be delivered", "N4"),
    ("壊れる", "kowareru", "to break", "N4"),
    ("謝る", "ayamaru", "to apologize", "N4"),
    ("残念", "zannen", "regrettable", "N4"),
    ("世話", "sewa", "looking after", "N4"),
    ("環境", "kankyou", "environment", "N3"),
    ("影響", "eikyou", "influence", "N3"),
    ("解決", "kaiketsu", "solution", "N3"),
    ("状況", "joukyou", "situation", "N3"),
    ("確認", "kakunin", "confirmation", "N3"),
    ("増加", "zouka", "increase", "N3"),
    ("減少", "genshou", "decrease", "N3"),
    ("表現", "hyougen", "expression", "N3"),
    ("貿易", "boueki", "trade", "N3"),
    ("政府", "seifu", "government", "N3"),
    ("技術", "gijutsu", "technology", "N3"),
    ("目的", "mokuteki", "purpose", "N3"),
];

pub fn builtin_entries() -> Vec<FlashcardEntry> {
    WORDS
        .iter()
        .map(|(japanese, romaji, english, category)| FlashcardEntry {
            japanese: japanese.to_string(),
            romaji: romaji.to_string(),
            english: english.to_string(),
            category: category.to_string(),
        })
        .collect()
}
