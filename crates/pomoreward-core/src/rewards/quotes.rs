//! Built-in motivational quotes, grouped by keyword.

const FALLBACK: &str = "motivation";

const CATALOG: &[(&str, [&str; 3])] = &[
    (
        "success",
        [
            "Success is not final, failure is not fatal: it is the courage to continue that counts. - Winston Churchill",
            "The only way to do great work is to love what you do. - Steve Jobs",
            "Success usually comes to those who are too busy to be looking for it. - Henry David Thoreau",
        ],
    ),
    (
        "perseverance",
        [
            "Perseverance is not a long race; it is many short races one after the other. - Walter Elliot",
            "The difference between the impossible and the possible lies in determination. - Tommy Lasorda",
            "It always seems impossible until it's done. - Nelson Mandela",
        ],
    ),
    (
        "growth",
        [
            "Growth is the only evidence of life. - John Henry Newman",
            "The only person you are destined to become is the person you decide to be. - Ralph Waldo Emerson",
            "Change is the end result of all true learning. - Leo Buscaglia",
        ],
    ),
    (
        "focus",
        [
            "Concentrate all your thoughts upon the work at hand. The sun's rays do not burn until brought to a focus. - Alexander Graham Bell",
            "The successful warrior is the average man, with laser-like focus. - Bruce Lee",
            "Focus is a matter of deciding what things you're not going to do. - John Carmack",
        ],
    ),
    (
        "motivation",
        [
            "Motivation is what gets you started. Habit is what keeps you going. - Jim Ryun",
            "The only limit to our realization of tomorrow is our doubts of today. - Franklin D. Roosevelt",
            "Believe you can and you're halfway there. - Theodore Roosevelt",
        ],
    ),
];

/// All quotes for a keyword (case-insensitive), falling back to "motivation".
pub fn for_keyword(keyword: &str) -> &'static [&'static str; 3] {
    let wanted = keyword.trim().to_lowercase();
    CATALOG
        .iter()
        .find(|(k, _)| *k == wanted)
        .or_else(|| CATALOG.iter().find(|(k, _)| *k == FALLBACK))
        .map(|(_, quotes)| quotes)
        .unwrap_or(&CATALOG[0].1)
}

/// The quote handed out for a keyword.
pub fn lookup(keyword: &str) -> &'static str {
    for_keyword(keyword)[0]
}
