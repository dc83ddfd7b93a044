//! Classification of compiled expressions into plot rows
//!
//! A host that plots formulas keeps one row per edited formula. What a row
//! does depends on the shape of its compiled expression:
//!
//! | Expression        | Row                                     |
//! |-------------------|-----------------------------------------|
//! | `y=f(x)` / `f(x)` | [`Row::Formula`], a graph of `x`        |
//! | `x=f(y)`          | [`Row::XFormula`]                       |
//! | `r=f(theta)`      | [`Row::RFormula`], polar                |
//! | `theta=f(r)`      | [`Row::ThetaFormula`], polar            |
//! | `a=1.5`           | [`Row::Slider`], a uniform              |
//! | `a=f(...)`        | [`Row::Variable`], a computed value     |
//! | anything else     | [`Row::Empty`]                          |

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::core::expression::Expression;

lazy_static! {
    static ref FORMULA: Regex = Regex::new(r"^(?:y *=)?(.+)$").unwrap();
    static ref X_FORMULA: Regex = Regex::new(r"^x *=(.+)$").unwrap();
    static ref R_FORMULA: Regex = Regex::new(r"^r *=(.+)$").unwrap();
    static ref THETA_FORMULA: Regex = Regex::new(r"^theta *=(.+)$").unwrap();
    static ref SLIDER: Regex =
        Regex::new(r"^([a-zA-Z_]\w*) *= *([+-]?(?:[0-9]*[.])?[0-9]+)$").unwrap();
    static ref VARIABLE: Regex = Regex::new(r"^([a-zA-Z_]\w*) *=(.*)$").unwrap();
}

/// Names that belong to the plot axes and never become variables.
const AXIS_NAMES: &[&str] = &["x", "y"];

/// A classified row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Row {
    Formula { body: String, expr: String },
    XFormula { body: String, expr: String },
    RFormula { body: String, expr: String },
    ThetaFormula { body: String, expr: String },
    Slider { name: String, value: f64 },
    Variable { name: String, body: String, expr: String },
    Empty,
}

impl Row {
    /// Classify a compiled expression. The first matching shape wins, in
    /// the order of the table above.
    pub fn classify(expression: &Expression) -> Row {
        let Expression { body, expr } = expression;
        let graph = |caps: regex::Captures| (body.clone(), caps[1].to_string());

        if let Some(caps) = FORMULA.captures(expr) {
            if !caps[1].contains('=') {
                let (body, expr) = graph(caps);
                return Row::Formula { body, expr };
            }
        }
        if let Some(caps) = X_FORMULA.captures(expr) {
            let (body, expr) = graph(caps);
            return Row::XFormula { body, expr };
        }
        if let Some(caps) = R_FORMULA.captures(expr) {
            let (body, expr) = graph(caps);
            return Row::RFormula { body, expr };
        }
        if let Some(caps) = THETA_FORMULA.captures(expr) {
            let (body, expr) = graph(caps);
            return Row::ThetaFormula { body, expr };
        }
        if let Some(caps) = SLIDER.captures(expr) {
            if !AXIS_NAMES.contains(&&caps[1]) {
                if let Ok(value) = caps[2].parse::<f64>() {
                    return Row::Slider {
                        name: caps[1].to_string(),
                        value,
                    };
                }
            }
        }
        if let Some(caps) = VARIABLE.captures(expr) {
            if !AXIS_NAMES.contains(&&caps[1]) {
                return Row::Variable {
                    name: caps[1].to_string(),
                    body: body.clone(),
                    expr: expr.clone(),
                };
            }
        }
        Row::Empty
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Row::Formula { .. } => "Formula",
            Row::XFormula { .. } => "XFormula",
            Row::RFormula { .. } => "RFormula",
            Row::ThetaFormula { .. } => "ThetaFormula",
            Row::Slider { .. } => "Slider",
            Row::Variable { .. } => "Variable",
            Row::Empty => "Empty",
        }
    }

    /// Name a slider or variable defines.
    pub fn name(&self) -> Option<&str> {
        match self {
            Row::Slider { name, .. } | Row::Variable { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether the row is drawn as a curve.
    pub fn is_graph(&self) -> bool {
        matches!(
            self,
            Row::Formula { .. } | Row::XFormula { .. } | Row::RFormula { .. } | Row::ThetaFormula { .. }
        )
    }

    /// Global GLSL declarations for the row. `id` keeps function names of
    /// different rows apart.
    pub fn definition(&self, id: usize) -> String {
        let function = |param: &str, body: &str, expr: &str| {
            format!("float formula{id}(float {param}) {{\n    {body}\n    return {expr};\n}}")
        };
        match self {
            Row::Formula { body, expr } => function("x", body, expr),
            Row::XFormula { body, expr } => function("y", body, expr),
            Row::RFormula { body, expr } => function("theta", body, expr),
            Row::ThetaFormula { body, expr } => function("r", body, expr),
            Row::Slider { name, .. } => format!("uniform float {name};\n"),
            Row::Variable { name, .. } => format!("float {name} = 0.0;\n"),
            Row::Empty => String::new(),
        }
    }

    /// Statements that compute the row's value inside the shader's main
    /// function. Only variables need any.
    pub fn calculation(&self) -> String {
        match self {
            Row::Variable { body, expr, .. } => format!("{body}\n{expr};\n"),
            _ => String::new(),
        }
    }

    /// Default `(lower, upper)` slider range for a slider row.
    pub fn slider_range(&self) -> Option<(f64, f64)> {
        match self {
            Row::Slider { value, .. } => Some(slider_range(*value)),
            _ => None,
        }
    }
}

/// Default `(lower, upper)` range for a slider starting at `value`.
///
/// The upper bound is the next power of ten above `|value|` and the lower
/// bound a tenth of it below zero, mirrored for negative values. Either bound
/// reaches at least 10 away from zero.
pub fn slider_range(value: f64) -> (f64, f64) {
    if value == 0.0 {
        return (-10.0, 10.0);
    }
    let mut upper = 10f64.powi(1 + value.abs().log10().floor() as i32);
    let mut lower = -upper.abs() / 10.0;
    if value < 0.0 {
        (upper, lower) = (-lower, -upper);
    }
    (lower.min(-10.0), upper.max(10.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(expr: &str) -> Row {
        Row::classify(&Expression::new("", expr))
    }

    #[test]
    fn test_formula_with_and_without_y() {
        assert_eq!(classify("y=x*2.0").kind_name(), "Formula");
        assert_eq!(
            classify("x*2.0"),
            Row::Formula {
                body: String::new(),
                expr: "x*2.0".into()
            }
        );
    }

    #[test]
    fn test_axis_formulas() {
        assert_eq!(classify("x=y").kind_name(), "XFormula");
        assert_eq!(classify("r=theta").kind_name(), "RFormula");
        assert_eq!(classify("theta=r").kind_name(), "ThetaFormula");
    }

    #[test]
    fn test_slider_and_variable() {
        assert_eq!(
            classify("a=-1.5"),
            Row::Slider {
                name: "a".into(),
                value: -1.5
            }
        );
        assert_eq!(classify("a=1.0+x").kind_name(), "Variable");
        assert_eq!(classify("a=1.0+x").name(), Some("a"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(classify(""), Row::Empty);
        assert_eq!(classify("x=y=z").kind_name(), "XFormula");
        assert_eq!(classify("2.0=y"), Row::Empty);
    }

    #[test]
    fn test_slider_range() {
        assert_eq!(slider_range(0.0), (-10.0, 10.0));
        assert_eq!(slider_range(3.0), (-10.0, 10.0));
        assert_eq!(slider_range(250.0), (-100.0, 1000.0));
        assert_eq!(slider_range(-250.0), (-1000.0, 100.0));
    }

    #[test]
    fn test_definitions() {
        let row = classify("a=1.0");
        assert_eq!(row.definition(0), "uniform float a;\n");
        assert_eq!(row.calculation(), "");
        let row = Row::classify(&Expression::new("", "y=x"));
        assert_eq!(row.definition(7), "float formula7(float x) {\n    \n    return x;\n}");
    }
}
