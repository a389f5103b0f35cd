//! JSON ABI loading.

use std::fmt;

use facet::Facet;

use crate::{EntryKind, Interface, MethodDescriptor, Param};

/// Errors raised while loading an interface description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The input is not a JSON array of ABI entries.
    InvalidJson(String),
    /// A `tuple` parameter came without `components`.
    MissingComponents { param: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::InvalidJson(msg) => write!(f, "invalid ABI JSON: {msg}"),
            SchemaError::MissingComponents { param } => {
                write!(f, "tuple parameter `{param}` has no components")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[derive(Debug, Facet)]
struct JsonEntry {
    #[facet(rename = "type", default)]
    kind: Option<String>,
    #[facet(default)]
    name: Option<String>,
    #[facet(default)]
    inputs: Vec<JsonParam>,
}

#[derive(Debug, Facet)]
struct JsonParam {
    #[facet(default)]
    name: String,
    #[facet(rename = "type")]
    ty: String,
    #[facet(default, recursive_type)]
    components: Vec<JsonParam>,
}

pub(crate) fn parse_interface(json: &str) -> Result<Interface, SchemaError> {
    let raw: Vec<JsonEntry> =
        facet_json::from_str(json).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;

    let entries = raw
        .into_iter()
        .map(|entry| {
            // Only an explicit "function" tag makes an entry callable.
            let kind = entry
                .kind
                .as_deref()
                .map(EntryKind::from_tag)
                .unwrap_or(EntryKind::Untagged);
            let parameters = entry
                .inputs
                .iter()
                .map(|p| Ok(Param::new(p.name.clone(), canonical_type(p)?)))
                .collect::<Result<Vec<_>, SchemaError>>()?;
            Ok(MethodDescriptor {
                kind,
                name: entry.name.unwrap_or_default(),
                parameters,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    tracing::debug!(
        entries = entries.len(),
        functions = entries.iter().filter(|m| m.is_function()).count(),
        "loaded ABI interface"
    );

    Ok(Interface { entries })
}

/// Expand `tuple`, `tuple[]`, `tuple[3][]`, ... into `(t1,t2)` form.
fn canonical_type(param: &JsonParam) -> Result<String, SchemaError> {
    let Some(suffix) = param.ty.strip_prefix("tuple") else {
        return Ok(param.ty.clone());
    };
    if param.components.is_empty() {
        return Err(SchemaError::MissingComponents {
            param: param.name.clone(),
        });
    }
    let inner = param
        .components
        .iter()
        .map(canonical_type)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("({}){suffix}", inner.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generator_fixture() {
        let json = r#"[
            {
                "constant": true,
                "inputs": [{"name": "x", "type": "uint256"}, {"name": "y", "type": "uint256"}],
                "name": "Method",
                "outputs": [{"name": "", "type": "uint256"}],
                "payable": false,
                "stateMutability": "view",
                "type": "function"
            },
            {"name": "Event", "anonymous": false, "type": "event", "inputs": []}
        ]"#;

        let interface = parse_interface(json).unwrap();
        assert_eq!(interface.entries.len(), 2);

        let method = &interface.entries[0];
        assert_eq!(method.kind, EntryKind::Function);
        assert_eq!(method.name, "Method");
        assert_eq!(method.parameter_types(), vec!["uint256", "uint256"]);

        assert_eq!(interface.entries[1].kind, EntryKind::Event);
    }

    #[test]
    fn untagged_entries_are_not_functions() {
        let interface = parse_interface(
            r#"[{"name": "EventX", "inputs": []}, {"type": "function", "name": "ping"}]"#,
        )
        .unwrap();
        assert_eq!(interface.entries[0].kind, EntryKind::Untagged);
        assert!(!interface.entries[0].is_function());
        let names: Vec<_> = interface.functions().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["ping"]);
    }

    #[test]
    fn nameless_entries_get_empty_name() {
        let interface = parse_interface(r#"[{"type": "fallback"}]"#).unwrap();
        assert_eq!(interface.entries[0].name, "");
        assert_eq!(interface.entries[0].kind, EntryKind::Fallback);
    }

    #[test]
    fn tuples_are_canonicalized() {
        let json = r#"[{
            "type": "function",
            "name": "submit",
            "inputs": [
                {"name": "orders", "type": "tuple[]", "components": [
                    {"name": "maker", "type": "address"},
                    {"name": "legs", "type": "tuple[2]", "components": [
                        {"name": "amount", "type": "uint128"},
                        {"name": "flag", "type": "bool"}
                    ]}
                ]}
            ]
        }]"#;

        let interface = parse_interface(json).unwrap();
        assert_eq!(
            interface.entries[0].parameters[0].ty,
            "(address,(uint128,bool)[2])[]"
        );
    }

    #[test]
    fn tuple_without_components_is_rejected() {
        let err = parse_interface(
            r#"[{"type": "function", "name": "f", "inputs": [{"name": "t", "type": "tuple"}]}]"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingComponents {
                param: "t".into()
            }
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            parse_interface("{not json"),
            Err(SchemaError::InvalidJson(_))
        ));
    }
}
