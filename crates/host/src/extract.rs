//! Identity extraction from heterogeneous host payloads.
//!
//! Compose payloads arrive in several shapes depending on where the host
//! built them. Each [`FieldProbe`] declares the exact shape it expects;
//! probes are tried in a fixed priority order, the first match wins, and
//! non-matching shapes are silently skipped — extraction never errors.

use serde_json::Value;
use tracing::trace;

/// One payload shape a probe knows how to read.
#[derive(Debug, Clone, Copy)]
pub struct FieldProbe {
    /// Dotted shape description, for logs.
    pub name: &'static str,
    /// Keys to descend through.
    pub path: &'static [&'static str],
}

/// Shapes carrying the replied-to user's id, in priority order.
pub const TARGET_USER_PROBES: &[FieldProbe] = &[
    FieldProbe {
        name: "message.message.author.id",
        path: &["message", "message", "author", "id"],
    },
    FieldProbe {
        name: "message.author.id",
        path: &["message", "author", "id"],
    },
    FieldProbe {
        name: "reply.author.id",
        path: &["reply", "author", "id"],
    },
    FieldProbe {
        name: "user.id",
        path: &["user", "id"],
    },
];

/// Shapes carrying the server id, in priority order.
pub const SERVER_PROBES: &[FieldProbe] = &[
    FieldProbe {
        name: "channel.guild_id",
        path: &["channel", "guild_id"],
    },
    FieldProbe {
        name: "message.message.guild_id",
        path: &["message", "message", "guild_id"],
    },
    FieldProbe {
        name: "message.guild_id",
        path: &["message", "guild_id"],
    },
];

impl FieldProbe {
    /// Read an identifier at this probe's path, if the payload has the shape.
    fn read(&self, payload: &Value) -> Option<String> {
        let mut node = payload;
        for key in self.path {
            node = node.get(key)?;
        }
        match node {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            // Some hosts serialize snowflake ids as numbers.
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

fn probe(payload: &Value, probes: &[FieldProbe]) -> Option<String> {
    probes.iter().find_map(|p| {
        let id = p.read(payload);
        if id.is_some() {
            trace!(shape = p.name, "Payload probe matched");
        }
        id
    })
}

/// The replied-to user's id, if any known shape matches.
pub fn target_user_id(payload: &Value) -> Option<String> {
    probe(payload, TARGET_USER_PROBES)
}

/// The server id, if any known shape matches.
pub fn server_id(payload: &Value) -> Option<String> {
    probe(payload, SERVER_PROBES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_every_known_user_shape() {
        let shapes = [
            json!({"message": {"message": {"author": {"id": "U1"}}}}),
            json!({"message": {"author": {"id": "U1"}}}),
            json!({"reply": {"author": {"id": "U1"}}}),
            json!({"user": {"id": "U1"}}),
        ];
        for payload in shapes {
            assert_eq!(target_user_id(&payload).as_deref(), Some("U1"));
        }
    }

    #[test]
    fn reads_every_known_server_shape() {
        let shapes = [
            json!({"channel": {"guild_id": "G1"}}),
            json!({"message": {"message": {"guild_id": "G1"}}}),
            json!({"message": {"guild_id": "G1"}}),
        ];
        for payload in shapes {
            assert_eq!(server_id(&payload).as_deref(), Some("G1"));
        }
    }

    #[test]
    fn first_matching_probe_wins() {
        let payload = json!({
            "message": {"author": {"id": "from-message"}},
            "user": {"id": "from-user"},
        });
        assert_eq!(target_user_id(&payload).as_deref(), Some("from-message"));
    }

    #[test]
    fn empty_ids_fall_through_to_later_probes() {
        let payload = json!({
            "message": {"author": {"id": ""}},
            "user": {"id": "U2"},
        });
        assert_eq!(target_user_id(&payload).as_deref(), Some("U2"));
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let payload = json!({"user": {"id": 123456789012345678_u64}});
        assert_eq!(
            target_user_id(&payload).as_deref(),
            Some("123456789012345678")
        );
    }

    #[test]
    fn unknown_shapes_yield_nothing() {
        for payload in [
            json!({}),
            json!(null),
            json!({"message": "just a string"}),
            json!({"user": {"id": null}}),
            json!(["not", "an", "object"]),
        ] {
            assert_eq!(target_user_id(&payload), None);
            assert_eq!(server_id(&payload), None);
        }
    }
}
