//! # Inflection
//!
//! Deterministic camelize / pluralize / singularize used to normalize role and
//! resource names. Only the trailing word of a compound name is inflected
//! (`AdminArticle` → `AdminArticles`, `site_editors` → `site_editor`), and a
//! leading capital on that word is preserved.
//!
//! The rules are a small ordered suffix table plus an irregular table and an
//! uncountable list. They are stable under repetition:
//!
//! ```
//! use access_keeper::inflect::{pluralize, singularize};
//!
//! assert_eq!(pluralize("article"), "articles");
//! assert_eq!(pluralize("articles"), "articles");
//! assert_eq!(singularize("editors"), "editor");
//! assert_eq!(singularize("editor"), "editor");
//! assert_eq!(pluralize("Person"), "People");
//! ```

/// Words whose singular and plural forms are identical.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

/// Irregular `(singular, plural)` pairs, matched against the whole word.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

/// Constraint on what precedes a matched suffix.
#[derive(Debug, Clone, Copy)]
enum Before {
    /// Anything, including nothing.
    Any,
    /// The suffix must be the whole word.
    Start,
    /// A character not in the set must precede the suffix.
    NoneOf(&'static str),
}

/// Replace `suffix` with `replacement` when `before` holds.
struct Rule {
    suffix: &'static str,
    before: Before,
    replacement: &'static str,
}

const fn rule(suffix: &'static str, before: Before, replacement: &'static str) -> Rule {
    Rule {
        suffix,
        before,
        replacement,
    }
}

// First match wins.
const PLURAL_RULES: &[Rule] = &[
    rule("quiz", Before::Any, "quizzes"),
    rule("matrix", Before::Any, "matrices"),
    rule("vertex", Before::Any, "vertices"),
    rule("index", Before::Any, "indices"),
    rule("octopi", Before::Any, "octopi"),
    rule("viri", Before::Any, "viri"),
    rule("quy", Before::Any, "quies"),
    rule("y", Before::NoneOf("aeiouy"), "ies"),
    rule("hive", Before::Any, "hives"),
    rule("fe", Before::NoneOf("f"), "ves"),
    rule("lf", Before::Any, "lves"),
    rule("rf", Before::Any, "rves"),
    rule("sis", Before::Any, "ses"),
    rule("buffalo", Before::Any, "buffaloes"),
    rule("tomato", Before::Any, "tomatoes"),
    rule("alias", Before::Any, "aliases"),
    rule("status", Before::Any, "statuses"),
    rule("octopus", Before::Any, "octopi"),
    rule("virus", Before::Any, "viri"),
    rule("axis", Before::Start, "axes"),
    rule("testis", Before::Start, "testes"),
    rule("bus", Before::Any, "buses"),
    rule("x", Before::Any, "xes"),
    rule("ch", Before::Any, "ches"),
    rule("ss", Before::Any, "sses"),
    rule("sh", Before::Any, "shes"),
    rule("s", Before::Any, "s"),
    rule("", Before::Any, "s"),
];

// First match wins.
const SINGULAR_RULES: &[Rule] = &[
    rule("databases", Before::Any, "database"),
    rule("quizzes", Before::Any, "quiz"),
    rule("matrices", Before::Any, "matrix"),
    rule("vertices", Before::Any, "vertex"),
    rule("indices", Before::Any, "index"),
    rule("aliases", Before::Any, "alias"),
    rule("statuses", Before::Any, "status"),
    rule("alias", Before::Any, "alias"),
    rule("status", Before::Any, "status"),
    rule("octopi", Before::Any, "octopus"),
    rule("viri", Before::Any, "virus"),
    rule("octopus", Before::Any, "octopus"),
    rule("virus", Before::Any, "virus"),
    rule("axes", Before::Start, "axis"),
    rule("testes", Before::Start, "testis"),
    rule("crises", Before::Any, "crisis"),
    rule("analyses", Before::Any, "analysis"),
    rule("diagnoses", Before::Any, "diagnosis"),
    rule("parentheses", Before::Any, "parenthesis"),
    rule("prognoses", Before::Any, "prognosis"),
    rule("synopses", Before::Any, "synopsis"),
    rule("theses", Before::Any, "thesis"),
    rule("shoes", Before::Any, "shoe"),
    rule("oes", Before::Any, "o"),
    rule("buses", Before::Any, "bus"),
    rule("bus", Before::Any, "bus"),
    rule("xes", Before::Any, "x"),
    rule("ches", Before::Any, "ch"),
    rule("sses", Before::Any, "ss"),
    rule("shes", Before::Any, "sh"),
    rule("movies", Before::Any, "movie"),
    rule("quies", Before::Any, "quy"),
    rule("ies", Before::NoneOf("aeiouy"), "y"),
    rule("lves", Before::Any, "lf"),
    rule("rves", Before::Any, "rf"),
    rule("hives", Before::Any, "hive"),
    rule("tives", Before::Any, "tive"),
    rule("ves", Before::NoneOf("f"), "fe"),
    rule("is", Before::Any, "is"),
    rule("ss", Before::Any, "ss"),
    rule("us", Before::Any, "us"),
    rule("s", Before::Any, ""),
];

impl Rule {
    fn apply(&self, word: &str) -> Option<String> {
        let stem = word.strip_suffix(self.suffix)?;
        let ok = match self.before {
            Before::Any => true,
            Before::Start => stem.is_empty(),
            Before::NoneOf(set) => stem.chars().next_back().is_some_and(|c| !set.contains(c)),
        };
        ok.then(|| format!("{stem}{}", self.replacement))
    }
}

/// Pluralize the trailing word of `name`.
///
/// # Example
///
/// ```
/// use access_keeper::inflect::pluralize;
///
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("AdminArticle"), "AdminArticles");
/// assert_eq!(pluralize("sheep"), "sheep");
/// ```
pub fn pluralize(name: &str) -> String {
    inflect_tail(name, |word| {
        if let Some((_, plural)) = IRREGULAR
            .iter()
            .find(|(singular, plural)| word == *singular || word == *plural)
        {
            return plural.to_string();
        }
        apply_rules(PLURAL_RULES, word)
    })
}

/// Singularize the trailing word of `name`.
///
/// # Example
///
/// ```
/// use access_keeper::inflect::singularize;
///
/// assert_eq!(singularize("admins"), "admin");
/// assert_eq!(singularize("people"), "person");
/// assert_eq!(singularize("knives"), "knife");
/// assert_eq!(singularize("status"), "status");
/// ```
pub fn singularize(name: &str) -> String {
    inflect_tail(name, |word| {
        if let Some((singular, _)) = IRREGULAR
            .iter()
            .find(|(singular, plural)| word == *singular || word == *plural)
        {
            return singular.to_string();
        }
        apply_rules(SINGULAR_RULES, word)
    })
}

/// Convert `snake_case` and `path/segments` into `CamelCase` and `Path::Segments`.
///
/// Existing capitals are kept and `::` qualifiers pass through. Empty pieces
/// are dropped.
///
/// # Example
///
/// ```
/// use access_keeper::inflect::camelize;
///
/// assert_eq!(camelize("article"), "Article");
/// assert_eq!(camelize("blog_post"), "BlogPost");
/// assert_eq!(camelize("admin/blog_post"), "Admin::BlogPost");
/// assert_eq!(camelize("Admin::BlogPost"), "Admin::BlogPost");
/// ```
pub fn camelize(name: &str) -> String {
    split_path(name)
        .map(|segment| segment.split('_').map(capitalize).collect::<String>())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("::")
}

/// Split on `::` and `/` path separators, skipping empty segments.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split("::")
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
}

fn capitalize(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn apply_rules(rules: &[Rule], word: &str) -> String {
    if UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    rules
        .iter()
        .find_map(|rule| rule.apply(word))
        .unwrap_or_else(|| word.to_string())
}

/// Run `f` on the lowercased trailing word of `name` and splice the result back.
fn inflect_tail(name: &str, f: impl Fn(&str) -> String) -> String {
    let start = tail_start(name);
    let (head, word) = name.split_at(start);
    if word.is_empty() {
        return name.to_string();
    }

    // Keep the original spelling of the unchanged prefix, so `HTMLPage`
    // becomes `HTMLPages` and `Person` becomes `People`.
    let lowered = word.to_lowercase();
    let inflected = f(&lowered);
    let shared = lowered
        .chars()
        .zip(inflected.chars())
        .take_while(|(a, b)| a == b)
        .count();
    let kept: String = word.chars().take(shared).collect();
    let rest: String = inflected.chars().skip(shared).collect();
    let shouting = word.chars().count() > 1 && !word.chars().any(char::is_lowercase);

    if shouting {
        format!("{head}{kept}{}", rest.to_uppercase())
    } else {
        format!("{head}{kept}{rest}")
    }
}

/// Byte offset where the trailing word begins.
///
/// Words are delimited by `_`, `-`, `/`, `:`, whitespace, and lowercase or
/// digit to uppercase transitions.
fn tail_start(name: &str) -> usize {
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (idx, c) in name.char_indices() {
        if matches!(c, '_' | '-' | '/' | ':') || c.is_whitespace() {
            start = idx + c.len_utf8();
        } else if c.is_uppercase()
            && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
        {
            start = idx;
        }
        prev = Some(c);
    }
    start
}
