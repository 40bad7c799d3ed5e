use indoc::indoc;
use pretty_assertions::assert_eq;
use symscan_preprocessor::{PreprocessOptions, preprocess, preprocess_into};

const SOURCE: &str = indoc! {r#"
    #include <stdio.h>
    #define MAX(a, b) \
        ((a) > (b) ? (a) : (b))

    /* Entry point.
     * Prints a greeting. */
    int main(void) {
        char c = '\n'; // newline
        printf("max: %d\n", MAX(1, 2));
        return 0;
    }
"#};

fn line_lengths(text: &str) -> Vec<usize> {
    text.split('\n').map(|line| line.chars().count()).collect()
}

#[test]
fn test_output_keeps_line_and_column_shape() {
    let cleaned = preprocess(SOURCE);

    assert_eq!(line_lengths(&cleaned), line_lengths(SOURCE));
}

#[test]
fn test_output_keeps_shape_without_blanking_literals() {
    let mut cleaned = String::new();
    preprocess_into(
        SOURCE,
        PreprocessOptions {
            blank_literals: false,
        },
        &mut cleaned,
    )
    .unwrap();

    assert_eq!(line_lengths(&cleaned), line_lengths(SOURCE));
    assert!(cleaned.contains(r#""max: %d\n""#));
}

#[test]
fn test_only_code_survives() {
    let cleaned = preprocess(SOURCE);
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    assert_eq!(
        words,
        vec![
            "int",
            "main(void)",
            "{",
            "char",
            "c",
            "=",
            "'",
            "';",
            "printf(\"",
            "\",",
            "MAX(1,",
            "2));",
            "return",
            "0;",
            "}",
        ]
    );
}
