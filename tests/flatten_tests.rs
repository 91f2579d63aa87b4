use billscan::ocr::vision::{flatten_lines, Block, Page, Paragraph, Symbol, TextAnnotation, Word};

fn symbol(text: &str) -> Symbol {
    Symbol { text: text.into() }
}

fn word(symbols: &[&str]) -> Word {
    Word {
        symbols: symbols.iter().map(|s| symbol(s)).collect(),
    }
}

fn paragraph(words: Vec<Word>) -> Paragraph {
    Paragraph { words }
}

fn block(paragraphs: Vec<Paragraph>) -> Block {
    Block { paragraphs }
}

#[test]
fn two_blocks_flatten_to_two_lines() {
    // Two blocks, one paragraph each, two words of two symbols per paragraph.
    let annotation = TextAnnotation {
        text: "ab cd\nef gh".into(),
        pages: vec![Page {
            blocks: vec![
                block(vec![paragraph(vec![word(&["a", "b"]), word(&["c", "d"])])]),
                block(vec![paragraph(vec![word(&["e", "f"]), word(&["g", "h"])])]),
            ],
        }],
    };

    let lines = flatten_lines(&annotation);
    assert_eq!(lines, vec!["ab cd".to_string(), "ef gh".to_string()]);
}

#[test]
fn no_symbol_is_lost() {
    let annotation = TextAnnotation {
        text: String::new(),
        pages: vec![Page {
            blocks: vec![block(vec![paragraph(vec![
                word(&["T", "O", "T", "A", "L"]),
                word(&["3", "9", ".", "6", "0"]),
            ])])],
        }],
    };

    let lines = flatten_lines(&annotation);
    assert_eq!(lines, vec!["TOTAL 39.60".to_string()]);
}

#[test]
fn missing_levels_yield_an_empty_sequence() {
    assert!(flatten_lines(&TextAnnotation::default()).is_empty());

    let no_blocks = TextAnnotation {
        text: String::new(),
        pages: vec![Page { blocks: vec![] }],
    };
    assert!(flatten_lines(&no_blocks).is_empty());

    let no_paragraphs = TextAnnotation {
        text: String::new(),
        pages: vec![Page {
            blocks: vec![block(vec![])],
        }],
    };
    assert!(flatten_lines(&no_paragraphs).is_empty());

    let no_words = TextAnnotation {
        text: String::new(),
        pages: vec![Page {
            blocks: vec![block(vec![paragraph(vec![])])],
        }],
    };
    assert!(flatten_lines(&no_words).is_empty());
}

#[test]
fn paragraph_order_is_preserved_across_pages() {
    let annotation = TextAnnotation {
        text: String::new(),
        pages: vec![
            Page {
                blocks: vec![block(vec![
                    paragraph(vec![word(&["first"])]),
                    paragraph(vec![word(&["second"])]),
                ])],
            },
            Page {
                blocks: vec![block(vec![paragraph(vec![word(&["third"])])])],
            },
        ],
    };

    let lines = flatten_lines(&annotation);
    assert_eq!(
        lines,
        vec!["first".to_string(), "second".to_string(), "third".to_string()]
    );
}
