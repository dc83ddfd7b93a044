//! Options for expression compilation and editing sessions

use serde::{Deserialize, Serialize};

// =============================================================================
// Expression Compiler Options
// =============================================================================

/// Options for compiling a formula to a numeric expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExprOptions {
    /// Function used for exponents (`x^2` → `mypow(x, (2.0))`)
    /// Default: `mypow`
    pub power_function: String,

    /// Function used for the postfix `!`
    /// Default: `factorial`
    pub factorial_function: String,

    /// Two-argument logarithm used for `log_{b}`
    /// Default: `log_base`
    pub log_base_function: String,

    /// Rewrite integer literals as floats (`2` → `2.0`)
    /// Default: true
    pub promote_integers: bool,

    /// Prefix of the accumulator variables generated for sums and products
    /// Default: `sum`
    pub accumulator_prefix: String,

    /// The accumulator counter restarts at zero once it passes this value
    /// Default: 100000
    pub counter_wrap: u32,
}

impl Default for ExprOptions {
    fn default() -> Self {
        Self {
            power_function: "mypow".to_string(),
            factorial_function: "factorial".to_string(),
            log_base_function: "log_base".to_string(),
            promote_integers: true,
            accumulator_prefix: "sum".to_string(),
            counter_wrap: 100_000,
        }
    }
}

impl ExprOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain `pow` for exponents, for hosts without the signed-base helper
    pub fn builtin_pow() -> Self {
        Self {
            power_function: "pow".to_string(),
            ..Self::default()
        }
    }

    /// Keep integer literals as written
    pub fn literal() -> Self {
        Self {
            promote_integers: false,
            ..Self::default()
        }
    }
}

// =============================================================================
// Editor Options
// =============================================================================

/// Options for an interactive editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Turn letter runs such as `sin` or `pi` into their constructs after
    /// every insert
    /// Default: true
    pub convert_specials: bool,

    /// `/` wraps the neighbouring operands into the new fraction
    /// Default: true
    pub greedy_fraction: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            convert_specials: true,
            greedy_fraction: true,
        }
    }
}

impl EditorOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Every key inserts exactly what was typed
    pub fn literal() -> Self {
        Self {
            convert_specials: false,
            greedy_fraction: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ExprOptions::default();
        assert_eq!(opts.power_function, "mypow");
        assert_eq!(opts.counter_wrap, 100_000);
        assert!(EditorOptions::default().convert_specials);
    }

    #[test]
    fn test_partial_json() {
        let opts: ExprOptions = serde_json::from_str(r#"{"power_function": "pow"}"#).unwrap();
        assert_eq!(opts, ExprOptions::builtin_pow());
        let opts: EditorOptions = serde_json::from_str(r#"{"greedy_fraction": false}"#).unwrap();
        assert!(opts.convert_specials);
        assert!(!opts.greedy_fraction);
    }
}
