//! Declaration text rendering.
//!
//! The renderer is deterministic: a given class list always produces the
//! same text. Output follows the house style of tab indentation and
//! single-quoted string literals; an external formatter, when configured,
//! runs on top of this.

/// Render the declaration file body for the given class names.
pub(super) fn render(classes: &[String], named_exports: bool) -> String {
    if named_exports {
        render_named(classes)
    } else {
        render_default(classes)
    }
}

/// The default shape: one readonly object holding every class.
fn render_default(classes: &[String]) -> String {
    if classes.is_empty() {
        return String::from("declare const styles: {};\nexport = styles;\n");
    }

    let mut out = String::from("declare const styles: {\n");
    for class in classes {
        out.push_str("\treadonly '");
        out.push_str(&escape_single_quoted(class));
        out.push_str("': string;\n");
    }
    out.push_str("};\nexport = styles;\n");
    out
}

/// One `export const` per class. Dashed names are camel-cased; names that
/// still are not valid identifiers are skipped with a warning.
fn render_named(classes: &[String]) -> String {
    let mut out = String::new();
    let mut emitted: Vec<String> = vec![];

    for class in classes {
        let name = camelize(class);
        if !is_identifier(&name) {
            tracing::warn!("skipping class '{}': not a valid identifier", class);
            continue;
        }
        if emitted.contains(&name) {
            continue;
        }
        out.push_str("export const ");
        out.push_str(&name);
        out.push_str(": string;\n");
        emitted.push(name);
    }

    out
}

/// Convert dashed names to camel case: `nav-item` becomes `navItem`.
fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// ASCII identifier check for emitted export names.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn escape_single_quoted(name: &str) -> String {
    name.replace('\\', "\\\\").replace('\'', "\\'")
}
