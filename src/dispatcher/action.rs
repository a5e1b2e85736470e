use crate::error::{GenerateError, Result};
use crate::spec::{Archetype, Layout, ACTION_NAMESPACE};
use std::str::FromStr;
use tracing::warn;

/// Archetype rendered for an unknown name inside the action namespace
pub const FALLBACK_ARCHETYPE: Archetype = Archetype::plain(Layout::ShortForm);

/// Map an inbound action identifier to the archetype it asks for
///
/// Accepts `org.umi-plugin-page-creator.<name>` and the bare `<name>`.
/// An unknown `<name>` inside the namespace renders [`FALLBACK_ARCHETYPE`];
/// an unknown bare name or an identifier from any other namespace is
/// `UnsupportedArchetype`.
pub fn resolve_action(action_type: &str) -> Result<Archetype> {
    let action_type = action_type.trim();
    let unsupported = || GenerateError::UnsupportedArchetype {
        name: action_type.to_string(),
    };

    match action_type
        .strip_prefix(ACTION_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
    {
        Some(name) => match Archetype::from_str(name) {
            Ok(archetype) => Ok(archetype),
            Err(_) => {
                warn!(
                    action = action_type,
                    fallback = FALLBACK_ARCHETYPE.name(),
                    "unknown action name, using fallback archetype"
                );
                Ok(FALLBACK_ARCHETYPE)
            }
        },
        None if action_type.contains('.') => Err(unsupported()),
        None => Archetype::from_str(action_type).map_err(|_| unsupported()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_every_archetype_resolves_from_its_action_id() {
        for archetype in Archetype::all() {
            assert_eq!(resolve_action(&archetype.action_id()).unwrap(), archetype);
            assert_eq!(resolve_action(archetype.name()).unwrap(), archetype);
        }
    }

    #[test]
    fn test_unknown_name_in_namespace_falls_back() {
        assert_eq!(
            resolve_action("org.umi-plugin-page-creator.wizard").unwrap(),
            FALLBACK_ARCHETYPE
        );
    }

    #[test]
    fn test_foreign_identifiers_are_rejected() {
        for id in [
            "org.other-plugin.table",
            "org.umi-plugin-page-creatorX.table",
            "wizard",
            "",
        ] {
            assert_eq!(
                resolve_action(id).unwrap_err().kind(),
                "unsupported_archetype",
                "{id}"
            );
        }
    }
}
