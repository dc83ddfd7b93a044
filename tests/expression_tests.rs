//! Expression compiler tests

use formulate::utils::text::normalize_whitespace;
use formulate::{latex_to_expression, Editor, EditorOptions, ExprCompiler, ExprOptions, Formula};

fn compile(latex: &str) -> (String, String) {
    let compiled = latex_to_expression(latex).unwrap();
    (normalize_whitespace(&compiled.body), compiled.expr)
}

// ============================================================================
// Straight-line expressions
// ============================================================================

mod straight_line {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expressions_from_latex() {
        let cases = [
            ("x", "x"),
            ("xy", "x*y"),
            (r"\frac{x}{y}", "(x)/(y)"),
            (r"\abs{x}", "abs(x)"),
            (r"\floor{x}y", "floor(x)*y"),
            (r"\ceil{x}^{3}", "mypow(ceil(x), (3.0))"),
            ("x^{2}", "mypow(x, (2.0))"),
            ("x!", "factorial(x)"),
            (r"\operatorname{sin}x", "sin(x)"),
            (r"\operatorname{sin}3x", "sin(3.0*x)"),
            (r"\operatorname{sin}\{3x\}y", "sin(3.0*x)*y"),
            (r"\operatorname{sin}\{3x\}^{3z}", "mypow(sin(3.0*x), (3.0*z))"),
            (r"\operatorname{sin}3-x", "sin(3.0)-x"),
            (r"\operatorname{sin}-x", "sin(-x)"),
            (r"y\sqrt{x-1}", "y*sqrt(x-1.0)"),
            (r"y\sqrt[3]{x-1}", "y*pow(x-1.0, 1.0/(3.0))"),
            (r"2\pi", "2.0*pi"),
            ("3.5x", "3.5*x"),
        ];
        for (latex, expected) in cases {
            let (body, expr) = compile(latex);
            assert_eq!(body, "", "body of {:?}", latex);
            assert_eq!(expr, expected, "compiling {:?}", latex);
        }
    }

    #[test]
    fn test_log_base() {
        assert_eq!(compile(r"\operatorname{log}_{2}x").1, "log_base(2.0,x)");
        assert_eq!(compile(r"\operatorname{log}x").1, "log(x)");
    }

    #[test]
    fn test_empty_formula() {
        assert_eq!(compile(""), (String::new(), String::new()));
    }
}

// ============================================================================
// Sums and products
// ============================================================================

mod loops {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_sum() {
        let (body, expr) = compile(r"\sum_{i=1}^{50}3i-1");
        assert_eq!(
            body,
            "float sum0 = 0.0; for (float i=1.0; i <= 50.0; i++) { sum0 += 3.0*i; }"
        );
        assert_eq!(expr, "sum0-1.0");
    }

    #[test]
    fn test_nested_sums() {
        let latex = r"x + x\sum_{i=1}^{4}[x^{2}(\sum_{j=1}^{i}x^{ij})+\sum_{k=1}^{i^{2}}\operatorname{exp}(ikx)]";
        let (body, expr) = compile(latex);
        let expected = normalize_whitespace(
            "
float sum2 = 0.0;
for (float i=1.0; i <= 4.0; i++) {
    float sum0 = 0.0;
    for (float j=1.0; j <= i; j++) {
        sum0 += mypow(x, (i*j));
    }
    float sum1 = 0.0;
    for (float k=1.0; k <= mypow(i, (2.0)); k++) {
        sum1 += exp(i*k*x);
    }
    sum2 += (mypow(x, (2.0))*(sum0)+sum1);
}
",
        );
        assert_eq!(body, expected);
        assert_eq!(expr, "x+x*sum2");
    }

    #[test]
    fn test_product() {
        let (body, expr) = compile(r"\prod_{i=4}^{50}\operatorname{sin}(3ix-1)");
        assert_eq!(
            body,
            "float sum0 = 1.0; for (float i=4.0; i <= 50.0; i++) { sum0 *= sin(3.0*i*x-1.0); }"
        );
        assert_eq!(expr, "sum0");
    }

    #[test]
    fn test_shared_compiler_numbers_accumulators() {
        let f = Formula::from_latex(r"\sum_{n=0}^{3}n").unwrap();
        let mut compiler = ExprCompiler::new();
        let first = compiler.compile(&f);
        let second = compiler.compile(&f);
        assert_eq!(first.expr, "sum0");
        assert_eq!(second.expr, "sum1");
        assert_eq!(compiler.counter(), 2);
        compiler.reset_counter();
        assert_eq!(compiler.compile(&f).expr, "sum0");
    }

    #[test]
    fn test_custom_accumulator_prefix() {
        let f = Formula::from_latex(r"\sum_{n=0}^{3}n").unwrap();
        let mut compiler = ExprCompiler::with_options(ExprOptions {
            accumulator_prefix: "acc".into(),
            ..ExprOptions::default()
        });
        let compiled = compiler.compile(&f);
        assert_eq!(compiled.expr, "acc0");
        assert!(compiled.body.contains("float acc0 = 0.0;"), "{}", compiled.body);
    }
}

// ============================================================================
// Compiling an editing session
// ============================================================================

mod sessions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_typed_formula_compiles() {
        let mut editor = Editor::new();
        editor.type_str("y=sin2x");
        let mut compiler = ExprCompiler::new();
        let compiled = editor.to_expression(&mut compiler);
        assert_eq!(compiled.expr, "y=sin(2.0*x)");
    }

    #[test]
    fn test_typed_fraction_compiles() {
        let mut editor = Editor::with_options(EditorOptions::default());
        editor.type_str("1/x");
        let compiled = editor.to_expression(&mut ExprCompiler::new());
        assert_eq!(compiled.expr, "(1.0)/(x)");
    }
}
