//! Symbol tables: Greek letters, named functions, script glyphs
//!
//! The ordered tables drive the special-token tokenizer, whose alternation
//! order matters (first alternative wins), so they are slices rather than
//! hash maps. Lookups by name go through `phf` maps.

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use phf::phf_map;

/// Greek letter names and their Unicode characters, in tokenizer order.
pub const GREEK_LETTERS: &[(&str, char)] = &[
    ("Alpha", 'Α'),
    ("Beta", 'Β'),
    ("Chi", 'Χ'),
    ("Delta", 'Δ'),
    ("Epsilon", 'Ε'),
    ("Eta", 'Η'),
    ("Gamma", 'Γ'),
    ("Iota", 'Ι'),
    ("Kappa", 'Κ'),
    ("Lambda", 'Λ'),
    ("Mu", 'Μ'),
    ("Nu", 'Ν'),
    ("Omega", 'Ω'),
    ("Omicron", 'Ο'),
    ("Phi", 'Φ'),
    ("Pi", 'Π'),
    ("Psi", 'Ψ'),
    ("Rho", 'Ρ'),
    ("Sigma", 'Σ'),
    ("Tau", 'Τ'),
    ("Theta", 'Θ'),
    ("Upsilon", 'Υ'),
    ("Xi", 'Ξ'),
    ("Zeta", 'Ζ'),
    ("alpha", 'α'),
    ("beta", 'β'),
    ("chi", 'χ'),
    ("delta", 'δ'),
    ("epsilon", 'ε'),
    ("eta", 'η'),
    ("gamma", 'γ'),
    ("iota", 'ι'),
    ("kappa", 'κ'),
    ("lambda", 'λ'),
    ("mu", 'μ'),
    ("nu", 'ν'),
    ("omega", 'ω'),
    ("omicron", 'ο'),
    ("phi", 'φ'),
    ("varphi", 'φ'),
    ("pi", 'π'),
    ("rho", 'ρ'),
    ("sigma", 'σ'),
    ("tau", 'τ'),
    ("theta", 'θ'),
    ("upsilon", 'υ'),
    ("xi", 'ξ'),
    ("zeta", 'ζ'),
    // Last, and only when not completing "epsi"/"upsi" (see `tokenize_specials`)
    ("psi", 'ψ'),
];

/// Greek macro names accepted by the LaTeX reader (`\alpha` → α).
pub static GREEK_MACROS: phf::Map<&'static str, char> = phf_map! {
    "Alpha" => 'Α', "Beta" => 'Β', "Chi" => 'Χ', "Delta" => 'Δ',
    "Epsilon" => 'Ε', "Eta" => 'Η', "Gamma" => 'Γ', "Iota" => 'Ι',
    "Kappa" => 'Κ', "Lambda" => 'Λ', "Mu" => 'Μ', "Nu" => 'Ν',
    "Omega" => 'Ω', "Omicron" => 'Ο', "Phi" => 'Φ', "Pi" => 'Π',
    "Psi" => 'Ψ', "Rho" => 'Ρ', "Sigma" => 'Σ', "Tau" => 'Τ',
    "Theta" => 'Θ', "Upsilon" => 'Υ', "Xi" => 'Ξ', "Zeta" => 'Ζ',
    "alpha" => 'α', "beta" => 'β', "chi" => 'χ', "delta" => 'δ',
    "epsilon" => 'ε', "varepsilon" => 'ε', "eta" => 'η', "gamma" => 'γ',
    "iota" => 'ι', "kappa" => 'κ', "lambda" => 'λ', "mu" => 'μ',
    "nu" => 'ν', "omega" => 'ω', "omicron" => 'ο', "phi" => 'φ',
    "varphi" => 'φ', "pi" => 'π', "psi" => 'ψ', "rho" => 'ρ',
    "sigma" => 'σ', "varsigma" => 'ς', "tau" => 'τ', "theta" => 'θ',
    "upsilon" => 'υ', "xi" => 'ξ', "zeta" => 'ζ',
};

/// Named functions rendered upright. Longer names sharing a prefix come first.
pub const FUNCTIONS: &[&str] = &[
    "asech", "acsch", "acosech", "acoth", "sech", "csch", "cosech", "coth", "asec", "acsc",
    "acosec", "acot", "arcsec", "arccsc", "arccosec", "arccot", "sec", "csc", "cosec", "cot",
    "asinh", "acosh", "atanh", "sinh", "cosh", "tanh", "asin", "acos", "atan", "arcsin",
    "arccos", "arctan", "sinc", "sin", "cos", "tan", "exp", "log", "ln", "lg", "sign", "sgn",
];

/// Words that become composite nodes rather than atoms.
pub const CONSTRUCT_WORDS: &[&str] = &["sum", "prod", "sqrt", "nthroot", "floor", "ceil"];

/// Characters typed as binary operators.
pub const BINARY_OPERATORS: &[char] = &['+', '-', '*', '='];

/// Superscript glyphs and their plain equivalents.
pub static SUPERSCRIPT_GLYPHS: phf::Map<char, char> = phf_map! {
    '⁰' => '0', '¹' => '1', '²' => '2', '³' => '3', '⁴' => '4',
    '⁵' => '5', '⁶' => '6', '⁷' => '7', '⁸' => '8', '⁹' => '9',
    'ⁱ' => 'i', 'ⁿ' => 'n', '⁺' => '+', '⁻' => '-', '⁽' => '(', '⁾' => ')',
};

/// Subscript glyphs and their plain equivalents.
pub static SUBSCRIPT_GLYPHS: phf::Map<char, char> = phf_map! {
    '₀' => '0', '₁' => '1', '₂' => '2', '₃' => '3', '₄' => '4',
    '₅' => '5', '₆' => '6', '₇' => '7', '₈' => '8', '₉' => '9',
    'ₐ' => 'a', 'ₑ' => 'e', 'ₒ' => 'o', 'ₓ' => 'x', 'ₕ' => 'h',
    'ₖ' => 'k', 'ₗ' => 'l', 'ₘ' => 'm', 'ₙ' => 'n', 'ₚ' => 'p',
    'ₛ' => 's', 'ₜ' => 't', '₊' => '+', '₋' => '-', '₍' => '(', '₎' => ')',
};

lazy_static! {
    /// Greek character → identifier used in generated expressions.
    ///
    /// Built from [`GREEK_LETTERS`] in order, so a later alias wins
    /// (φ compiles to `varphi`).
    pub static ref GREEK_IDENTIFIERS: FxHashMap<char, &'static str> = {
        let mut map = FxHashMap::default();
        for &(name, c) in GREEK_LETTERS {
            map.insert(c, name);
        }
        map
    };
}

pub fn is_function(name: &str) -> bool {
    FUNCTIONS.contains(&name)
}

pub fn greek_letter(name: &str) -> Option<char> {
    GREEK_LETTERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, c)| c)
}
