//! Class-name extraction from plain CSS.
//!
//! The extractor walks the token stream of an already-normalized style
//! sheet and harvests class selectors. It never validates selectors; a
//! malformed statement is skipped with a warning and scanning continues
//! with the next rule.

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

/// Collect exported class names from plain CSS.
///
/// Names are returned in first-occurrence order without duplicates. Only
/// selector preludes are scanned: the scanner descends into grouping
/// at-rules (`@media`, `@supports`, `@document`) and functional
/// pseudo-classes (`:not(...)`, `:is(...)`), while declaration blocks,
/// attribute selectors and all other at-rules never contribute names.
pub fn class_names(css: &str) -> Vec<String> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut classes = vec![];
    collect_rules(&mut parser, &mut classes);
    classes
}

/// Walk a rule list, harvesting classes from each statement.
fn collect_rules<'i>(parser: &mut Parser<'i, '_>, classes: &mut Vec<String>) {
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        if let Err(e) = parse_statement(parser, classes) {
            tracing::warn!("selector scan error: {:?}", e);
            skip_to_next_rule(parser);
        }
    }
}

/// Parse one statement: an at-rule or a qualified rule.
fn parse_statement<'i>(
    parser: &mut Parser<'i, '_>,
    classes: &mut Vec<String>,
) -> Result<(), CssParseError<'i, ()>> {
    let start = parser.state();
    let first = match parser.next() {
        Ok(token) => token.clone(),
        Err(e) => return Err(e.into()),
    };

    if let Token::AtKeyword(name) = first {
        parse_at_rule(parser, &name, classes)
    } else {
        parser.reset(&start);
        parse_qualified_rule(parser, classes)
    }
}

/// Handle an at-rule whose `@` keyword was already consumed.
fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
    name: &str,
    classes: &mut Vec<String>,
) -> Result<(), CssParseError<'i, ()>> {
    // Conditional group rules nest full rule lists. Everything else is
    // skipped wholesale: `@keyframes` selectors are not class names and
    // `@font-face` bodies hold declarations.
    let grouping = matches!(name, "media" | "supports" | "document" | "-moz-document");

    parser.parse_until_before(
        Delimiter::CurlyBracketBlock | Delimiter::Semicolon,
        |p| -> Result<(), CssParseError<'i, ()>> {
            while p.next().is_ok() {}
            Ok(())
        },
    )?;

    match parser.next() {
        Ok(Token::CurlyBracketBlock) => {
            if grouping {
                parser.parse_nested_block(|p| -> Result<(), CssParseError<'i, ()>> {
                    collect_rules(p, classes);
                    Ok(())
                })?;
            }
            // A non-grouping block is skipped when iteration continues.
            Ok(())
        }
        // `;` ends statement-style at-rules; EOF ends the sheet.
        _ => Ok(()),
    }
}

/// Handle a qualified rule: scan its selector prelude, skip its block.
fn parse_qualified_rule<'i>(
    parser: &mut Parser<'i, '_>,
    classes: &mut Vec<String>,
) -> Result<(), CssParseError<'i, ()>> {
    parser.parse_until_before(
        Delimiter::CurlyBracketBlock,
        |p| -> Result<(), CssParseError<'i, ()>> {
            scan_selector(p, classes);
            Ok(())
        },
    )?;

    // Consume the `{`; the block body is skipped when iteration continues.
    let _ = parser.next();
    Ok(())
}

/// Scan selector tokens for class names.
fn scan_selector<'i>(parser: &mut Parser<'i, '_>, classes: &mut Vec<String>) {
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Delim('.') => {
                if let Ok(name) = parser.expect_ident() {
                    let name = name.to_string();
                    if !classes.contains(&name) {
                        classes.push(name);
                    }
                }
            }
            // `:not(...)`, `:is(...)` and friends may nest class selectors.
            Token::Function(_) | Token::ParenthesisBlock => {
                let _ = parser.parse_nested_block(|p| -> Result<(), CssParseError<'i, ()>> {
                    scan_selector(p, classes);
                    Ok(())
                });
            }
            // Everything else, attribute blocks included, contributes no
            // names; unparsed blocks are skipped automatically.
            _ => {}
        }
    }
}

/// Recover from a malformed statement by skipping past its block or `;`.
fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                let _ = parser.parse_nested_block(|p| {
                    while !p.is_exhausted() {
                        let _ = p.next();
                    }
                    Ok::<_, CssParseError<'_, ()>>(())
                });
                return;
            }
            Ok(Token::Semicolon) => return,
            Ok(_) => continue,
            Err(_) => return,
        }
    }
}
