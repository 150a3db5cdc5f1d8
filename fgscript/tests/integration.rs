use fgscript::{ErrorKind, GenerateError, Generator, Options, translate};

const HEADER: &str = "<?xml version=\"1.0\"?><flowgorithm fileversion=\"4.2\">";

fn run(source: &str) -> String {
    translate(source, 0, &Options::default()).expect("translation failed")
}

/// Translate a body wrapped in `fn main () _ void` and return only the body markup.
fn body(lines: &str) -> String {
    let source = format!("fn main () _ void\n{}\nend\n", lines);
    let output = run(&source);
    let prefix = format!(
        "{}<function name=\"main\" type=\"void\" variable=\"\"><parameters/><body>",
        HEADER
    );
    output
        .strip_prefix(&prefix)
        .and_then(|rest| rest.strip_suffix("</body></function></flowgorithm>\n"))
        .expect("unexpected document frame")
        .to_string()
}

fn fail(source: &str) -> fgscript::TranslateError {
    translate(source, 0, &Options::default()).expect_err("translation should fail")
}

#[test]
fn empty_program() {
    assert_eq!(run(""), format!("{}</flowgorithm>\n", HEADER));
}

#[test]
fn hello_world() {
    let output = run("fn main () _ void\n    print \"hi\"\nend\n");
    assert_eq!(output.matches("<function name=\"main\"").count(), 1);
    assert!(output.contains("<function name=\"main\" type=\"void\" variable=\"\">"));
    assert_eq!(
        output
            .matches("<output expression=\"&quot;hi&quot;\" newline=\"False\"/>")
            .count(),
        1
    );
    assert!(output.ends_with("</body></function></flowgorithm>\n"));
}

#[test]
fn function_parameters() {
    let output = run("fn add (a Integer b Integer) sum Integer\nset sum a + b\nend");
    assert_eq!(
        output,
        format!(
            "{}<function name=\"add\" type=\"Integer\" variable=\"sum\"><parameters>\
             <parameter name=\"a\" type=\"Integer\" array=\"False\"/>\
             <parameter name=\"b\" type=\"Integer\" array=\"False\"/>\
             </parameters><body><assign variable=\"sum\" expression=\"a + b\"/>\
             </body></function></flowgorithm>\n",
            HEADER
        )
    );
}

#[test]
fn several_functions() {
    let output = run("fn main () _ void\ncall f()\nend\n\nfn f () _ void\nend\n");
    assert_eq!(output.matches("<function ").count(), 2);
    assert!(output.contains("<call expression=\"f()\"/>"));
}

#[test]
fn blank_lines_are_skipped() {
    let output = run("\n   \nfn main () _ void\n\t\n\nend\n\n");
    assert!(output.contains("<body></body>"));
}

#[test]
fn crlf_line_endings() {
    let output = run("fn main () _ void\r\nscan x\r\nend\r\n");
    assert!(output.contains("<input variable=\"x\"/>"));
}

#[test]
fn declaration() {
    assert_eq!(
        body("var x Integer"),
        "<declare name=\"x\" type=\"Integer\" array=\"False\" size=\"\"/>"
    );
    assert_eq!(
        body("var a b c Real"),
        "<declare name=\"a, b, c\" type=\"Real\" array=\"False\" size=\"\"/>"
    );
}

#[test]
fn print_and_println() {
    assert_eq!(
        body("print \"x = \" x"),
        "<output expression=\"&quot;x = &quot; &amp; x\" newline=\"False\"/>"
    );
    assert_eq!(
        body("println x"),
        "<output expression=\"x\" newline=\"True\"/>"
    );
}

#[test]
fn comments_inside_blocks() {
    assert_eq!(
        body("# hello   world"),
        "<comment text=\"hello world\"/>"
    );
}

#[test]
fn top_level_comments_are_dropped() {
    let output = run("# header comment\nfn main () _ void\nend\n# trailing");
    assert!(!output.contains("<comment"));
}

#[test]
fn top_level_comments_with_compat_option() {
    let options = Options {
        emit_top_level_comments: true,
        ..Options::default()
    };
    let output = translate("# header\n", 0, &options).unwrap();
    assert!(output.contains("<comment text=\"header\"/>"));
}

#[test]
fn if_else() {
    let output = body("if x > 0\nprint \"pos\"\nelse\nprint \"neg\"\nend");
    assert_eq!(
        output,
        "<if expression=\"x > 0\"><then>\
         <output expression=\"&quot;pos&quot;\" newline=\"False\"/>\
         </then><else>\
         <output expression=\"&quot;neg&quot;\" newline=\"False\"/>\
         </else></if>"
    );
    assert_eq!(output.matches("</then><else>").count(), 1);
    assert_eq!(output.matches("</if>").count(), 1);
}

#[test]
fn if_without_else() {
    assert_eq!(
        body("if done\nend"),
        "<if expression=\"done\"><then></then><else/></if>"
    );
}

#[test]
fn else_if_chain() {
    let output = body("if a\ncall x\nelse if b\ncall y\nelse\ncall z\nend");
    assert_eq!(
        output,
        "<if expression=\"a\"><then><call expression=\"x\"/></then><else>\
         <if expression=\"b\"><then><call expression=\"y\"/></then><else>\
         <call expression=\"z\"/></else></if></else></if>"
    );
}

#[test]
fn else_if_without_final_else() {
    assert_eq!(
        body("if a\nelse if b\nelse if c\nend"),
        "<if expression=\"a\"><then></then><else>\
         <if expression=\"b\"><then></then><else>\
         <if expression=\"c\"><then></then><else/></if>\
         </else></if></else></if>"
    );
}

#[test]
fn nested_ifs_close_independently() {
    assert_eq!(
        body("if a\nif b\nelse\nend\nelse\nend"),
        "<if expression=\"a\"><then><if expression=\"b\"><then></then><else>\
         </else></if></then><else></else></if>"
    );
}

#[test]
fn while_and_do() {
    assert_eq!(
        body("while i < 10\nset i i + 1\nend"),
        "<while expression=\"i < 10\"><assign variable=\"i\" expression=\"i + 1\"/></while>"
    );
    assert_eq!(
        body("do i < 10\nend"),
        "<do expression=\"i < 10\"></do>"
    );
}

#[test]
fn for_loop() {
    assert_eq!(
        body("for i from 1 to 10 step 1\nend"),
        "<for variable=\"i\" start=\"1\" end=\"10\" direction=\"inc\" step=\"1\"></for>"
    );
}

#[test]
fn for_loop_backward_with_expressions() {
    assert_eq!(
        body("for backward i from n - 1 to 0 step 2 * k\nend"),
        "<for variable=\"i\" start=\"n - 1\" end=\"0\" direction=\"dec\" step=\"2 * k\"></for>"
    );
}

#[test]
fn deeply_nested_blocks() {
    let output = body("while a\nfor i from 1 to 2 step 1\ndo b\nif c\nend\nend\nend\nend");
    assert!(output.ends_with("</then><else/></if></do></for></while>"));
}

#[test]
fn generation_is_deterministic() {
    let source = "fn main () _ void\nvar i Integer\nfor i from 1 to 3 step 1\nprintln i\nend\nend\n";
    assert_eq!(run(source), run(source));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn end_without_block() {
    let err = fail("end");
    assert_eq!(err.error, GenerateError::UnexpectedEnd);
    assert_eq!(err.error.kind(), ErrorKind::Structural);
    assert_eq!(err.line, 1);
}

#[test]
fn extra_end_after_function() {
    let err = fail("fn main () _ void\nend\nend");
    assert_eq!(err.error, GenerateError::UnexpectedEnd);
    assert_eq!(err.line, 3);
}

#[test]
fn unmatched_end_tolerated_with_compat_option() {
    let options = Options {
        tolerate_unmatched_end: true,
        ..Options::default()
    };
    assert!(translate("fn main () _ void\nend\nend\n", 0, &options).is_ok());
}

#[test]
fn double_else() {
    let err = fail("fn main () _ void\nif x\nelse\nelse\nend\nend");
    assert_eq!(err.error, GenerateError::ElseWithoutIf);
    assert_eq!(err.line, 4);
}

#[test]
fn else_without_if() {
    let err = fail("fn main () _ void\nwhile x\nelse\nend\nend");
    assert_eq!(err.error, GenerateError::ElseWithoutIf);
}

#[test]
fn else_with_stray_arguments() {
    let err = fail("fn main () _ void\nif x\nelse y\nend\nend");
    assert_eq!(err.error, GenerateError::ElseArguments { found: 1 });
    assert_eq!(err.error.kind(), ErrorKind::Arity);
}

#[test]
fn else_if_needs_expression() {
    let err = fail("fn main () _ void\nif x\nelse if\nend\nend");
    assert_eq!(err.error, GenerateError::MissingExpression { keyword: "if" });
}

#[test]
fn statements_outside_function() {
    let err = fail("print \"hi\"");
    assert_eq!(
        err.error,
        GenerateError::OutsideFunction {
            keyword: "print".to_string()
        }
    );
    assert_eq!(
        err.to_string(),
        "line 1: statement \"print\" is not allowed outside of function"
    );
}

#[test]
fn top_level_statements_with_compat_option() {
    let output = translate("print x\n", 0, &Options::lenient()).unwrap();
    assert!(output.contains("<output expression=\"x\" newline=\"False\"/>"));
}

#[test]
fn unknown_command() {
    let err = fail("fn main () _ void\nloop forever\nend");
    assert_eq!(err.error, GenerateError::UnknownCommand("loop".to_string()));
    assert_eq!(err.error.kind(), ErrorKind::Vocabulary);
    assert_eq!(err.line, 2);
}

#[test]
fn unknown_command_at_top_level_is_outside_function() {
    let err = fail("loop forever");
    assert_eq!(err.error.kind(), ErrorKind::Structural);
}

#[test]
fn unclosed_blocks() {
    let err = fail("fn main () _ void\nwhile x\n");
    assert_eq!(
        err.error,
        GenerateError::UnclosedBlocks {
            innermost: "while",
            open: 2
        }
    );
    assert_eq!(err.line, 2);
}

#[test]
fn nested_function() {
    let err = fail("fn main () _ void\nfn inner () _ void\nend\nend");
    assert_eq!(
        err.error,
        GenerateError::NestedFunction {
            name: "inner".to_string()
        }
    );
}

#[test]
fn function_arity() {
    let err = fail("fn main () void");
    assert_eq!(err.to_string(), "line 1: \"fn\" expects 4 arguments (found 3)");
}

#[test]
fn function_parameters_must_be_parenthesized() {
    let err = fail("fn main args _ void");
    assert_eq!(err.error.kind(), ErrorKind::Shape);
}

#[test]
fn function_parameters_must_pair() {
    let err = fail("fn main (a Integer b) _ void\nend");
    assert_eq!(
        err.error,
        GenerateError::MalformedParameters {
            function: "main".to_string()
        }
    );
}

#[test]
fn for_missing_delimiters() {
    let err = fail("fn main () _ void\nfor i in 1 to 10 step 1\nend\nend");
    assert_eq!(err.to_string(), "line 2: \"for\" expects expression \"from\"");

    let err = fail("fn main () _ void\nfor i from 1 until 10 step 1\nend\nend");
    assert_eq!(err.to_string(), "line 2: \"for\" expects expression \"to\"");

    let err = fail("fn main () _ void\nfor i from 1 to 10 by 1\nend\nend");
    assert_eq!(err.to_string(), "line 2: \"for\" expects expression \"step\"");

    let err = fail("fn main () _ void\nfor i from 1 2 3 to 10 step\nend\nend");
    assert_eq!(err.to_string(), "line 2: \"for\" expects expression \"step\"");
}

#[test]
fn for_too_short() {
    let err = fail("fn main () _ void\nfor i from 1 to 10\nend\nend");
    assert_eq!(err.error.kind(), ErrorKind::Arity);
}

#[test]
fn simple_statement_arity() {
    let cases = [
        ("var x", "\"var\" expects at least 2 arguments (found 1)"),
        ("set x", "\"set\" expects at least 2 arguments (found 1)"),
        ("call", "\"call\" expects at least 1 argument (found 0)"),
        ("println", "\"println\" expects at least 1 argument (found 0)"),
        ("scan a b", "\"scan\" expects 1 argument (found 2)"),
        ("#", "\"#\" expects at least 1 argument (found 0)"),
        ("while", "\"while\" expects expression"),
        ("end now", "\"end\" expects 0 arguments (found 1)"),
    ];
    for (line, message) in cases {
        let err = fail(&format!("fn main () _ void\n{}\nend", line));
        assert_eq!(err.error.to_string(), message, "for line {:?}", line);
    }
}

#[test]
fn failed_statement_leaves_generator_untouched() {
    let mut generator = Generator::default();
    generator.process(&["fn", "main", "()", "_", "void"]).unwrap();
    let before = generator.as_str().to_string();

    assert!(generator.process(&["for", "i", "from", "1", "to", "2", "by", "1"]).is_err());
    assert!(generator.process(&["else", "if"]).is_err());
    assert_eq!(generator.as_str(), before);
    assert_eq!(generator.depth(), 1);
}

#[test]
fn empty_statement() {
    let mut generator = Generator::default();
    assert_eq!(generator.process(&[]), Err(GenerateError::EmptyStatement));
}

#[test]
fn diagnostic_points_at_line() {
    let source = "fn main () _ void\n  bogus\nend\n";
    let err = translate(source, 7, &Options::default()).unwrap_err();
    assert_eq!(&source[err.span.clone()], "  bogus");

    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.message, "unknown command \"bogus\"");
    assert_eq!(diagnostic.labels[0].file_id, 7);
}
