use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// The layer a node belongs to. This is the single canonical mapping between
/// the user-facing type strings and the typed representation; everything that
/// constructs nodes from strings goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Input,
    Generation,
    Ensemble,
    Validation,
    Context,
    Output,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Input,
        NodeKind::Generation,
        NodeKind::Ensemble,
        NodeKind::Validation,
        NodeKind::Context,
        NodeKind::Output,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Generation => "generation",
            NodeKind::Ensemble => "ensemble",
            NodeKind::Validation => "validation",
            NodeKind::Context => "context",
            NodeKind::Output => "output",
        }
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unrecognized node type: '{}'", s))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 2-D canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Retrieval depth for knowledge-base lookups, passed through to the remote
/// executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntensity {
    Exact,
    #[default]
    Standard,
    Comprehensive,
}

/// Which model provider an LLM node targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Openai,
    Anthropic,
    Ollama,
}

/// Configuration shared by the four LLM-processing node kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: ModelProvider,
    pub model: String,
    pub prompt_template: String,
    pub output_format: String,
    pub knowledge_base: Option<String>,
    pub search_intensity: SearchIntensity,
}

/// Per-kind mutable payload of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeAttributes {
    Text { content: String },
    Llm(LlmConfig),
}

impl NodeAttributes {
    /// The default attributes a freshly created node of `kind` carries.
    pub fn defaults_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Input | NodeKind::Output => NodeAttributes::Text {
                content: String::new(),
            },
            _ => NodeAttributes::Llm(LlmConfig {
                provider: ModelProvider::default(),
                model: default_model(kind).to_string(),
                prompt_template: default_prompt(kind).to_string(),
                output_format: default_output_format(kind).to_string(),
                knowledge_base: None,
                search_intensity: SearchIntensity::default(),
            }),
        }
    }
}

fn default_model(_kind: NodeKind) -> &'static str {
    "gpt-4o"
}

fn default_prompt(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Generation => {
            "Derive candidate requirements from the source material below.\n\n{input}"
        }
        NodeKind::Ensemble => {
            "Merge the candidate requirement sets below into one deduplicated list, \
             keeping the strongest phrasing of each item.\n\n{candidates}"
        }
        NodeKind::Validation => {
            "Review the requirement list below for contradictions, gaps and ambiguity. \
             Return the corrected list.\n\n{requirements}"
        }
        NodeKind::Context => "Background material for this workflow:\n\n{context}",
        NodeKind::Input | NodeKind::Output => "",
    }
}

fn default_output_format(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Generation | NodeKind::Ensemble | NodeKind::Validation => {
            "One requirement per line as: <id> | <title> | <description> | <category> | <priority>"
        }
        _ => "",
    }
}

/// A single node of the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub attributes: NodeAttributes,
}

impl Node {
    /// Creates a node of the given kind with its default attributes and a
    /// fresh unique id.
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Self {
            id: generate_node_id(kind),
            kind,
            position,
            attributes: NodeAttributes::defaults_for(kind),
        }
    }
}

/// Ids must stay unique across rapid successive creations, so the timestamp
/// alone is not enough; a random suffix disambiguates same-millisecond nodes.
pub fn generate_node_id(kind: NodeKind) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: u16 = rand::random();
    format!("{}-{}-{:04x}", kind.as_str(), millis, suffix)
}
