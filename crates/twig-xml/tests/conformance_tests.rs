//! Conformance tests: serialized trees must tokenize like their source.

use twig_xml::{Token, XmlTokenizer, parse_str};

/// First position where two token streams disagree.
#[derive(Debug, PartialEq, Eq)]
struct Divergence {
    index: usize,
    left: Option<Token>,
    right: Option<Token>,
}

/// Walk the token streams of `left` and `right` in lockstep and report the
/// first token that differs. A stream that ends (or fails) early diverges
/// with `None` on its side.
fn first_divergence(left: &str, right: &str) -> Option<Divergence> {
    let mut lhs = XmlTokenizer::from(left);
    let mut rhs = XmlTokenizer::from(right);
    let mut index = 0;
    loop {
        let a = lhs.next().and_then(Result::ok);
        let b = rhs.next().and_then(Result::ok);
        if a != b {
            return Some(Divergence {
                index,
                left: a,
                right: b,
            });
        }
        if a.is_none() {
            return None;
        }
        index += 1;
    }
}

fn assert_same_tokens(left: &str, right: &str) {
    if let Some(divergence) = first_divergence(left, right) {
        panic!("token streams diverge:\n  left:  {left}\n  right: {right}\n  at: {divergence:?}");
    }
}

/// Parse then serialize.
fn rewrite(input: &str) -> String {
    parse_str(input)
        .expect("input should parse")
        .to_xml_string()
        .expect("tree should serialize")
}

#[test]
fn test_canonical_documents_survive_a_rewrite() {
    let inputs = [
        "<a></a>",
        "<a x=\"1\" y=\"2\"><b>t</b></a>",
        "<!--head-->\n<root><![CDATA[<raw> & ]]]></root>\n<!--tail-->",
        "<r>one<!--two--><![CDATA[three]]><s>four</s>five</r>",
        "<p a=\"1\" a=\"2\"></p>",
    ];
    for input in inputs {
        assert_same_tokens(input, &rewrite(input));
    }
}

#[test]
fn test_rewrite_is_idempotent() {
    let inputs = [
        "<a/>",
        "  <a k='v'>\n\t<b/>text<c  ></c >\n</a>  ",
        "<!--x--><list><item n='1'/><item n='2'/></list>",
    ];
    for input in inputs {
        let once = rewrite(input);
        let twice = rewrite(&once);
        assert_eq!(once, twice);
        assert_same_tokens(&once, &twice);
    }
}

#[test]
fn test_self_closing_and_explicit_close_build_the_same_tree() {
    assert_eq!(rewrite("<a><b/></a>"), rewrite("<a><b></b></a>"));
}

#[test]
fn test_quote_style_is_normalized() {
    assert_eq!(rewrite("<a k='v'/>"), "<a k=\"v\"></a>");
}

#[test]
fn test_value_with_double_quotes_keeps_single_quotes() {
    let input = "<a t='say \"hi\"'/>";
    let once = rewrite(input);
    assert_eq!(once, "<a t='say \"hi\"'></a>");

    let tree = parse_str(&once).expect("rewritten markup should parse");
    let a = tree.document_element().unwrap();
    assert_eq!(tree.as_element(a).unwrap().attribute("t"), Some("say \"hi\""));
    assert_same_tokens(&once, &rewrite(&once));
}

#[test]
fn test_divergence_is_reported_at_first_difference() {
    let divergence = first_divergence("<a>x</a>", "<a>y</a>").unwrap();
    assert_eq!(divergence.index, 2);
    assert_eq!(
        divergence.left,
        Some(Token::Text {
            data: "x".to_string()
        })
    );
    assert_eq!(
        divergence.right,
        Some(Token::Text {
            data: "y".to_string()
        })
    );
}

#[test]
fn test_divergence_when_one_stream_fails() {
    let divergence = first_divergence("<a></a>", "<a></a b>").unwrap();
    assert_eq!(divergence.index, 3);
    assert_eq!(divergence.right, None);
}

#[test]
fn test_identical_streams_do_not_diverge() {
    assert_eq!(first_divergence("<a><b/></a>", "<a><b/></a>"), None);
}
