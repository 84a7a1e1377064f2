// Resource name normalisation: make management-system identifiers safe for
// file names, CSV columns and URL path segments.

use crate::models::ResourceType;

/// Destination names: physical member qualifier (`Module!Queue@Server`).
const DEST_MODULE_PHYSICAL_SEPARATOR: char = '@';
/// Destination names: JMS module qualifier (`Module!Queue`).
const DEST_SERVER_MODULE_SEPARATOR: char = '!';
/// Web application names: `<server>_/<context>`.
const WEBAPP_SERVER_NAME_SEPARATOR: &str = "_/";
const BAD_CHARS: [char; 3] = ['/', '[', ']'];
const GOOD_CHAR: char = '_';

/// Strip type-specific qualifiers and replace unsafe characters. Never fails.
pub fn normalize(resource_type: ResourceType, raw_name: &str) -> String {
    let name = strip_qualifier(resource_type, raw_name);
    let sanitized = name.replace(BAD_CHARS, &GOOD_CHAR.to_string());
    // Exactly one trailing '_' is dropped, and only before trimming.
    sanitized
        .strip_suffix(GOOD_CHAR)
        .unwrap_or(&sanitized)
        .trim()
        .to_string()
}

fn strip_qualifier(resource_type: ResourceType, raw_name: &str) -> &str {
    match resource_type {
        ResourceType::Destination => {
            // '@' wins over '!' when both are present.
            let pos = raw_name
                .find(DEST_MODULE_PHYSICAL_SEPARATOR)
                .or_else(|| raw_name.find(DEST_SERVER_MODULE_SEPARATOR));
            match pos {
                Some(p) if p > 0 => &raw_name[p + 1..],
                _ => raw_name,
            }
        }
        ResourceType::WebApp => match raw_name.find(WEBAPP_SERVER_NAME_SEPARATOR) {
            Some(p) if p > 0 => &raw_name[p + WEBAPP_SERVER_NAME_SEPARATOR.len()..],
            _ => raw_name,
        },
        ResourceType::Core | ResourceType::DataSource | ResourceType::HostMachine => raw_name,
    }
}
