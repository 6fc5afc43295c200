use mantle_crypto::Signature;
use mantle_entities::{AssetId, ClassificationId, IdentityId};
use mantle_types::constants::FIRST_ORDER_COMPOSITE_ID_SEPARATOR;
use mantle_types::{Address, Dec, Id, PropertyList};
use serde::{Deserialize, Serialize};

use crate::error::{KeeperError, KeeperResult};
use crate::message::{Action, Message};

/// Signer fields shared by every request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseReq {
    /// Hex-encoded signer address.
    #[serde(default)]
    pub from: String,
    /// Hex-encoded signature over the message's sign bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// A transaction as submitted over the wire.
///
/// ```json
/// {
///   "type": "send",
///   "baseReq": { "from": "0a1b..." },
///   "fromID": "fromID",
///   "toID": "defaultAddr",
///   "ownableID": "stake",
///   "value": "10"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "baseReq", default)]
    pub base_req: BaseReq,
    #[serde(flatten)]
    pub body: RequestBody,
}

/// Per-type request fields. Every field is a string; missing fields decode
/// as empty and are caught by [`TransactionRequest::validate`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RequestBody {
    NubIdentity {
        #[serde(rename = "nubID", default)]
        nub_id: String,
    },
    DefineClassification {
        #[serde(rename = "immutableProperties", default)]
        immutable_properties: String,
        #[serde(rename = "mutableProperties", default)]
        mutable_properties: String,
    },
    Mint {
        #[serde(rename = "toID", default)]
        to_id: String,
        #[serde(rename = "ownableID", default)]
        ownable_id: String,
        #[serde(default)]
        value: String,
    },
    Send {
        #[serde(rename = "fromID", default)]
        from_id: String,
        #[serde(rename = "toID", default)]
        to_id: String,
        #[serde(rename = "ownableID", default)]
        ownable_id: String,
        #[serde(default)]
        value: String,
    },
    Burn {
        #[serde(rename = "fromID", default)]
        from_id: String,
        #[serde(rename = "ownableID", default)]
        ownable_id: String,
        #[serde(default)]
        value: String,
    },
    MintAsset {
        #[serde(rename = "fromID", default)]
        from_id: String,
        #[serde(rename = "toID", default)]
        to_id: String,
        #[serde(rename = "classificationID", default)]
        classification_id: String,
        #[serde(rename = "immutableProperties", default)]
        immutable_properties: String,
        #[serde(rename = "mutableProperties", default)]
        mutable_properties: String,
    },
    MutateAsset {
        #[serde(rename = "fromID", default)]
        from_id: String,
        #[serde(rename = "assetID", default)]
        asset_id: String,
        #[serde(rename = "mutableProperties", default)]
        mutable_properties: String,
    },
}

impl RequestBody {
    /// The wire `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NubIdentity { .. } => "nubIdentity",
            Self::DefineClassification { .. } => "defineClassification",
            Self::Mint { .. } => "mint",
            Self::Send { .. } => "send",
            Self::Burn { .. } => "burn",
            Self::MintAsset { .. } => "mintAsset",
            Self::MutateAsset { .. } => "mutateAsset",
        }
    }
}

/// How a request field is checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rule {
    /// A single id component: identifier characters, no separators.
    Component,
    /// An id that may join components with `|`.
    Composite,
    /// A property list string or a decimal, checked when parsed.
    Free,
}

struct Field<'a> {
    name: &'static str,
    value: &'a str,
    rule: Rule,
    required: bool,
}

impl<'a> Field<'a> {
    fn required(name: &'static str, value: &'a str, rule: Rule) -> Self {
        Self {
            name,
            value,
            rule,
            required: true,
        }
    }

    fn optional(name: &'static str, value: &'a str) -> Self {
        Self {
            name,
            value,
            rule: Rule::Free,
            required: false,
        }
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=' | '.' | '|')
}

impl TransactionRequest {
    pub fn new(from: &Address, body: RequestBody) -> Self {
        Self {
            base_req: BaseReq {
                from: from.to_hex(),
                signature: None,
            },
            body,
        }
    }

    /// Decode one request from JSON.
    pub fn from_json(json: &str) -> KeeperResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a JSON array of requests.
    pub fn decode_batch(json: &str) -> KeeperResult<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    fn fields(&self) -> Vec<Field<'_>> {
        use Rule::*;
        match &self.body {
            RequestBody::NubIdentity { nub_id } => vec![Field::required("nubID", nub_id, Component)],
            RequestBody::DefineClassification {
                immutable_properties,
                mutable_properties,
            } => vec![
                Field::optional("immutableProperties", immutable_properties),
                Field::optional("mutableProperties", mutable_properties),
            ],
            RequestBody::Mint {
                to_id,
                ownable_id,
                value,
            } => vec![
                Field::required("toID", to_id, Component),
                Field::required("ownableID", ownable_id, Composite),
                Field::required("value", value, Free),
            ],
            RequestBody::Send {
                from_id,
                to_id,
                ownable_id,
                value,
            } => vec![
                Field::required("fromID", from_id, Component),
                Field::required("toID", to_id, Component),
                Field::required("ownableID", ownable_id, Composite),
                Field::required("value", value, Free),
            ],
            RequestBody::Burn {
                from_id,
                ownable_id,
                value,
            } => vec![
                Field::required("fromID", from_id, Component),
                Field::required("ownableID", ownable_id, Composite),
                Field::required("value", value, Free),
            ],
            RequestBody::MintAsset {
                from_id,
                to_id,
                classification_id,
                immutable_properties,
                mutable_properties,
            } => vec![
                Field::required("fromID", from_id, Component),
                Field::required("toID", to_id, Component),
                Field::required("classificationID", classification_id, Composite),
                Field::optional("immutableProperties", immutable_properties),
                Field::optional("mutableProperties", mutable_properties),
            ],
            RequestBody::MutateAsset {
                from_id,
                asset_id,
                mutable_properties,
            } => vec![
                Field::required("fromID", from_id, Component),
                Field::required("assetID", asset_id, Composite),
                Field::required("mutableProperties", mutable_properties, Free),
            ],
        }
    }

    /// Check required fields and id syntax.
    pub fn validate(&self) -> KeeperResult<()> {
        if self.base_req.from.is_empty() {
            return Err(KeeperError::Request("required field from missing".into()));
        }
        for field in self.fields() {
            if field.value.is_empty() {
                if field.required {
                    return Err(KeeperError::Request(format!("required field {} missing", field.name)));
                }
                continue;
            }
            let valid = match field.rule {
                Rule::Component => {
                    field.value.chars().all(is_id_char) && Id::atomic(field.value).is_well_formed()
                }
                Rule::Composite => field.value.chars().all(is_id_char),
                Rule::Free => true,
            };
            if !valid {
                return Err(KeeperError::Request(format!("invalid field {}", field.name)));
            }
        }
        Ok(())
    }

    /// Validate and convert into a typed [`Message`].
    pub fn make_message(&self) -> KeeperResult<Message> {
        self.validate()?;
        let from: Address = self.base_req.from.parse()?;
        let signature = self
            .base_req
            .signature
            .as_deref()
            .map(str::parse::<Signature>)
            .transpose()
            .map_err(|e| KeeperError::Request(format!("invalid signature: {e}")))?;

        let action = match &self.body {
            RequestBody::NubIdentity { nub_id } => Action::NubIdentity {
                nub_id: IdentityId::new(nub_id.as_str()),
            },
            RequestBody::DefineClassification {
                immutable_properties,
                mutable_properties,
            } => Action::DefineClassification {
                immutables: immutable_properties.parse()?,
                mutables: mutable_properties.parse()?,
            },
            RequestBody::Mint {
                to_id,
                ownable_id,
                value,
            } => Action::Mint {
                to_id: IdentityId::new(to_id.as_str()),
                ownable_id: Id::atomic(ownable_id.as_str()),
                value: value.parse::<Dec>()?,
            },
            RequestBody::Send {
                from_id,
                to_id,
                ownable_id,
                value,
            } => Action::Send {
                from_id: IdentityId::new(from_id.as_str()),
                to_id: IdentityId::new(to_id.as_str()),
                ownable_id: Id::atomic(ownable_id.as_str()),
                value: value.parse::<Dec>()?,
            },
            RequestBody::Burn {
                from_id,
                ownable_id,
                value,
            } => Action::Burn {
                from_id: IdentityId::new(from_id.as_str()),
                ownable_id: Id::atomic(ownable_id.as_str()),
                value: value.parse::<Dec>()?,
            },
            RequestBody::MintAsset {
                from_id,
                to_id,
                classification_id,
                immutable_properties,
                mutable_properties,
            } => Action::MintAsset {
                from_id: IdentityId::new(from_id.as_str()),
                to_id: IdentityId::new(to_id.as_str()),
                classification_id: read_classification_id(classification_id)?,
                immutables: immutable_properties.parse::<PropertyList>()?,
                mutables: mutable_properties.parse::<PropertyList>()?,
            },
            RequestBody::MutateAsset {
                from_id,
                asset_id,
                mutable_properties,
            } => Action::MutateAsset {
                from_id: IdentityId::new(from_id.as_str()),
                asset_id: read_asset_id(asset_id)?,
                mutables: mutable_properties.parse()?,
            },
        };

        Ok(Message {
            from,
            action,
            signature,
        })
    }
}

/// Parse `chainID|hashID`.
pub fn read_classification_id(s: &str) -> KeeperResult<ClassificationId> {
    Ok(ClassificationId::from_id(&Id::atomic(s))?)
}

/// Parse `chainID|hashID|assetHash`: a classification id followed by the
/// immutables hash.
pub fn read_asset_id(s: &str) -> KeeperResult<AssetId> {
    let (classification, hash) = s
        .rsplit_once(FIRST_ORDER_COMPOSITE_ID_SEPARATOR)
        .ok_or_else(|| KeeperError::Request(format!("invalid asset id {s:?}")))?;
    let classification_id = read_classification_id(classification)?;
    Ok(AssetId::new(classification_id.as_id(), Id::hash(hash)))
}
