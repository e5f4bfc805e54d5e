use crate::error::Result;
use crate::expiry;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A time-boxed rental of a slot, as stored under `/transactions/{id}`.
///
/// Records are written by several clients, so every field decodes leniently:
/// a value of the wrong type degrades to its string form or to `None` rather
/// than rejecting the whole record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Record {
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub slot_id: String,

    /// Key of the credential this rental consumes a usage slot on
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub assign_to: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub last_email: Option<String>,

    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub last_password: Option<String>,

    #[serde(default, deserialize_with = "lenient_user_id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Set once the record has been cleared; hidden records never show again
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_user_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

// Only a literal boolean counts; "true" as a string does not hide a record
fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool())
}

impl Record {
    pub fn is_hidden(&self) -> bool {
        self.hidden == Some(true)
    }

    /// Parsed end time, `None` when missing or unparseable
    pub fn ends_at(&self) -> Option<NaiveDateTime> {
        self.end_time.as_deref().and_then(expiry::parse_timestamp)
    }

    pub fn has_ended(&self, now: NaiveDateTime) -> bool {
        self.ends_at().map(|end| end < now).unwrap_or(false)
    }
}

/// One value under the transactions mapping.
///
/// The mapping mixes rental records with plain numeric counters, so every
/// value is decoded into one of these variants at the store boundary. Any
/// object is a record; numbers are counters; everything else is kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Counter(f64),
    Record(Record),
    Other(Value),
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => match n.as_f64() {
                Some(count) => Entry::Counter(count),
                None => Entry::Other(Value::Number(n)),
            },
            Value::Object(_) => match serde_json::from_value(value.clone()) {
                Ok(record) => Entry::Record(record),
                Err(e) => {
                    tracing::warn!("Undecodable transaction record: {}", e);
                    Entry::Other(value)
                }
            },
            other => Entry::Other(other),
        })
    }
}

impl Entry {
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Entry::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Record id -> entry
pub type Snapshot = BTreeMap<String, Entry>;

/// Decode a raw store snapshot into a [`Snapshot`].
///
/// `null` means the path does not exist yet. Arrays show up when every key is
/// a small integer; their indices become the ids.
pub fn decode_snapshot(value: Value) -> Result<Snapshot> {
    let mut snapshot = Snapshot::new();

    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (id, raw) in map {
                snapshot.insert(id, serde_json::from_value(raw)?);
            }
        }
        Value::Array(items) => {
            for (index, raw) in items.into_iter().enumerate() {
                if !raw.is_null() {
                    snapshot.insert(index.to_string(), serde_json::from_value(raw)?);
                }
            }
        }
        other => {
            tracing::warn!("Ignoring non-mapping transactions snapshot: {}", other);
        }
    }

    Ok(snapshot)
}

/// Account whose usage counter is tied to the rentals assigned to it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credential {
    #[serde(default)]
    pub usage_count: Option<Value>,
}

impl Credential {
    /// Look up a credential by key in the root snapshot of the service
    pub fn lookup(credentials: &Value, key: &str) -> Option<Self> {
        credentials
            .get(key)
            .filter(|raw| raw.is_object())
            .and_then(|raw| serde_json::from_value(raw.clone()).ok())
    }

    /// The usage count after releasing one rental, floored at zero.
    ///
    /// Returns `None` when the stored count is missing or not a number.
    pub fn decremented_usage(&self) -> Option<Value> {
        let count = self.usage_count.as_ref()?;

        if let Some(n) = count.as_i64() {
            Some(Value::from(n.saturating_sub(1).max(0)))
        } else if let Some(n) = count.as_u64() {
            Some(Value::from(n - 1))
        } else {
            count.as_f64().map(|n| Value::from((n - 1.0).max(0.0)))
        }
    }
}
