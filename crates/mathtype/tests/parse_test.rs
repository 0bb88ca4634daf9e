use mathtype::{parse, Arena, Config, FracStyle, Node, ScriptPlacement, TextKind};

fn ident(text: &str) -> Node<'_> {
    Node::Identifier {
        text,
        upright: false,
    }
}

fn op(text: &str) -> Node<'_> {
    Node::Operator { text, large: false }
}

#[test]
fn fraction() {
    let arena = Arena::new();
    let node = parse(r"\frac{a}{b}", &Config::default(), &arena);
    assert_eq!(
        node,
        &Node::Fraction {
            num: &ident("a"),
            denom: &ident("b"),
            style: FracStyle::Inherit,
        }
    );
}

#[test]
fn fraction_styles() {
    let arena = Arena::new();
    let config = Config::default();
    let (one, two) = (Node::Number("1"), Node::Number("2"));
    assert_eq!(
        parse(r"\dfrac{1}{2}", &config, &arena),
        &Node::Fraction {
            num: &one,
            denom: &two,
            style: FracStyle::Display,
        }
    );
    assert_eq!(
        parse(r"\tfrac{1}{2}", &config, &arena),
        &Node::Fraction {
            num: &one,
            denom: &two,
            style: FracStyle::Text,
        }
    );
}

#[test]
fn script_order_does_not_matter() {
    let arena = Arena::new();
    let config = Config::default();
    let (x, i, two) = (ident("x"), ident("i"), Node::Number("2"));
    let expected = Node::Scripted {
        base: &x,
        sub: Some(&i),
        sup: Some(&two),
        placement: ScriptPlacement::SubSup,
    };
    assert_eq!(parse("x^2_i", &config, &arena), &expected);
    assert_eq!(parse("x_i^2", &config, &arena), &expected);
    assert_eq!(parse("x _ i ^ 2", &config, &arena), &expected);
}

#[test]
fn limits_of_large_operators() {
    let arena = Arena::new();
    let sum = Node::Operator {
        text: "∑",
        large: true,
    };
    let (i, eq, one, n) = (ident("i"), op("="), Node::Number("1"), ident("n"));
    let under = Node::Row(&[&i, &eq, &one]);

    let node = parse(r"\sum_{i=1}^{n}", &Config::default(), &arena);
    assert_eq!(
        node,
        &Node::Scripted {
            base: &sum,
            sub: Some(&under),
            sup: Some(&n),
            placement: ScriptPlacement::UnderOver,
        }
    );

    let config = Config {
        use_munderover: false,
        ..Default::default()
    };
    let node = parse(r"\sum_{i=1}^{n}", &config, &arena);
    assert_eq!(
        node,
        &Node::Scripted {
            base: &sum,
            sub: Some(&under),
            sup: Some(&n),
            placement: ScriptPlacement::SubSup,
        }
    );
}

#[test]
fn scripts_of_ordinary_operators_stay_beside() {
    let arena = Arena::new();
    let node = parse(r"\times_2", &Config::default(), &arena);
    assert_eq!(
        node,
        &Node::Scripted {
            base: &op("×"),
            sub: Some(&Node::Number("2")),
            sup: None,
            placement: ScriptPlacement::SubSup,
        }
    );
}

#[test]
fn pmatrix() {
    let arena = Arena::new();
    let node = parse(
        r"\begin{pmatrix} a & b \\ c & d \end{pmatrix}",
        &Config::default(),
        &arena,
    );
    assert_eq!(
        node,
        &Node::Matrix {
            rows: &[
                &[&ident("a"), &ident("b")],
                &[&ident("c"), &ident("d")]
            ],
            open: "(",
            close: ")",
        }
    );
}

#[test]
fn ragged_rows() {
    let arena = Arena::new();
    let node = parse(
        r"\begin{cases} 1 & x > 0 \\ 0 \end{cases}",
        &Config::default(),
        &arena,
    );
    let Node::Matrix { rows, open, close } = node else {
        panic!("expected a matrix, got {node:?}");
    };
    assert_eq!((*open, *close), ("{", ""));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[1], &[&Node::Number("0")]);
}

#[test]
fn array_column_spec_is_skipped() {
    let arena = Arena::new();
    let node = parse(
        r"\begin{array}{cc} 1 & 2 \end{array}",
        &Config::default(),
        &arena,
    );
    assert_eq!(
        node,
        &Node::Matrix {
            rows: &[&[&Node::Number("1"), &Node::Number("2")]],
            open: "",
            close: "",
        }
    );
}

#[test]
fn nested_matrices() {
    let arena = Arena::new();
    let node = parse(
        r"\begin{matrix} \begin{bmatrix} x \end{bmatrix} & y \end{matrix}",
        &Config::default(),
        &arena,
    );
    assert_eq!(
        node,
        &Node::Matrix {
            rows: &[&[
                &Node::Matrix {
                    rows: &[&[&ident("x")]],
                    open: "[",
                    close: "]",
                },
                &ident("y"),
            ]],
            open: "",
            close: "",
        }
    );
}

#[test]
fn unclosed_matrix_keeps_last_row() {
    let arena = Arena::new();
    let config = Config::default();
    assert_eq!(
        parse(r"\begin{matrix} a & b \\ c", &config, &arena),
        &Node::Matrix {
            rows: &[&[&ident("a"), &ident("b")], &[&ident("c")]],
            open: "",
            close: "",
        }
    );
    assert_eq!(
        parse(r"\begin{matrix} a &", &config, &arena),
        &Node::Matrix {
            rows: &[&[&ident("a")]],
            open: "",
            close: "",
        }
    );
}

#[test]
fn unknown_environment_is_transparent() {
    let arena = Arena::new();
    let config = Config::default();
    assert_eq!(
        parse(r"\begin{equation} x \end{equation} y", &config, &arena),
        &Node::Row(&[&ident("x"), &ident("y")])
    );
    assert_eq!(
        parse(r"\begin{} x", &config, &arena),
        &Node::Row(&[&Node::Row(&[]), &ident("x")])
    );
}

#[test]
fn unknown_command() {
    let arena = Arena::new();
    assert_eq!(
        parse(r"\foobar", &Config::default(), &arena),
        &ident("foobar")
    );
}

#[test]
fn letter_runs_are_one_identifier() {
    let arena = Arena::new();
    assert_eq!(
        parse("abc", &Config::default(), &arena),
        &ident("abc")
    );
}

#[test]
fn text_is_verbatim() {
    let arena = Arena::new();
    assert_eq!(
        parse(r"\text{ if {x} \alpha }", &Config::default(), &arena),
        &Node::Text {
            text: r" if {x} \alpha ",
            kind: TextKind::Text,
        }
    );
}

#[test]
fn unbalanced_braces_consume_everything() {
    let arena = Arena::new();
    assert_eq!(
        parse("{{{x+y", &Config::default(), &arena),
        &Node::Row(&[&ident("x"), &op("+"), &ident("y")])
    );
}

#[test]
fn unclosed_constructs() {
    let arena = Arena::new();
    let config = Config::default();
    assert_eq!(
        parse(r"\left[ x", &config, &arena),
        &Node::Fenced {
            open: "[",
            close: "",
            body: &ident("x"),
        }
    );
    assert_eq!(
        parse(r"\sqrt[3", &config, &arena),
        &Node::Radical {
            body: &Node::Row(&[]),
            index: Some(&Node::Number("3")),
        }
    );
    assert_eq!(
        parse(r"\frac{a", &config, &arena),
        &Node::Fraction {
            num: &ident("a"),
            denom: &Node::Row(&[]),
            style: FracStyle::Inherit,
        }
    );
    assert_eq!(
        parse(r"\text{abc", &config, &arena),
        &Node::Text {
            text: "abc",
            kind: TextKind::Text,
        }
    );
}

#[test]
fn right_needs_a_word_boundary() {
    let arena = Arena::new();
    assert_eq!(
        parse(r"\left( a \rightarrow b \right)", &Config::default(), &arena),
        &Node::Fenced {
            open: "(",
            close: ")",
            body: &Node::Row(&[&ident("a"), &op("→"), &ident("b")]),
        }
    );
}

#[test]
fn escaped_delimiters() {
    let arena = Arena::new();
    let config = Config::default();
    for (source, open, close) in [
        (r"\left\( x \right\)", "(", ")"),
        (r"\left\[ x \right\]", "[", "]"),
        (r"\left\| x \right\|", "|", "|"),
        (r"\left\{ x \right\}", "{", "}"),
        (r"\left\Vert x \right\rangle", "‖", "⟩"),
    ] {
        assert_eq!(
            parse(source, &config, &arena),
            &Node::Fenced {
                open,
                close,
                body: &ident("x"),
            },
            "{source}"
        );
    }
}

#[test]
fn unknown_delimiter_is_a_backslash() {
    let arena = Arena::new();
    let config = Config::default();
    assert_eq!(
        parse(r"\left\foo x \right|", &config, &arena),
        &Node::Fenced {
            open: "\\",
            close: "|",
            body: &Node::Row(&[&ident("foo"), &ident("x")]),
        }
    );
    assert_eq!(
        parse(r"\left( x \right\. y", &config, &arena),
        &Node::Row(&[
            &Node::Fenced {
                open: "(",
                close: "\\",
                body: &ident("x"),
            },
            &op("."),
            &ident("y"),
        ])
    );
}

#[test]
fn stray_tokens() {
    let arena = Arena::new();
    let config = Config::default();
    assert_eq!(
        parse("a}b", &config, &arena),
        &Node::Row(&[&ident("a"), &ident("b")])
    );
    assert_eq!(
        parse("x & y", &config, &arena),
        &Node::Row(&[&ident("x"), &op("&"), &ident("y")])
    );
    assert_eq!(
        parse(r"a \\ b", &config, &arena),
        &Node::Row(&[&ident("a"), &Node::LineBreak, &ident("b")])
    );
    assert_eq!(parse(r"\end{matrix} x", &config, &arena), &ident("x"));
    assert_eq!(
        parse(r"\right) x", &config, &arena),
        &Node::Row(&[&op(")"), &ident("x")])
    );
    assert_eq!(parse("]", &config, &arena), &op("]"));
}

#[test]
fn stray_scripts_get_an_empty_base() {
    let arena = Arena::new();
    let config = Config::default();
    assert_eq!(
        parse("^2", &config, &arena),
        &Node::Scripted {
            base: &Node::Row(&[]),
            sub: None,
            sup: Some(&Node::Number("2")),
            placement: ScriptPlacement::SubSup,
        }
    );
    assert_eq!(
        parse("x^2^3", &config, &arena),
        &Node::Row(&[
            &Node::Scripted {
                base: &ident("x"),
                sub: None,
                sup: Some(&Node::Number("2")),
                placement: ScriptPlacement::SubSup,
            },
            &Node::Scripted {
                base: &Node::Row(&[]),
                sub: None,
                sup: Some(&Node::Number("3")),
                placement: ScriptPlacement::SubSup,
            },
        ])
    );
    assert_eq!(
        parse("x^", &config, &arena),
        &Node::Scripted {
            base: &ident("x"),
            sub: None,
            sup: Some(&Node::Row(&[])),
            placement: ScriptPlacement::SubSup,
        }
    );
}

#[test]
fn empty_input() {
    let arena = Arena::new();
    assert_eq!(parse("", &Config::default(), &arena), &Node::Row(&[]));
    assert_eq!(parse(" \n\t", &Config::default(), &arena), &Node::Row(&[]));
    assert_eq!(parse("\\", &Config::default(), &arena), &Node::Row(&[]));
}

#[test]
fn spaces_come_from_the_config() {
    let arena = Arena::new();
    let config = Config {
        thin_space: 0.5,
        qquad: 3.0,
        ..Default::default()
    };
    assert_eq!(
        parse(r"\,\!\qquad", &config, &arena),
        &Node::Row(&[&Node::Space(0.5), &Node::Space(-0.5), &Node::Space(3.0)])
    );
}
