//! Serializable payloads exchanged with the remote execution collaborator.
//!
//! The core's only obligation toward the remote API is producing a
//! well-formed representation of the current graph and consuming the final
//! results table. Transport, streaming and cancellation live outside this
//! crate.

use crate::error::RequestError;
use crate::layer::layer_members;
use crate::model::{
    LlmConfig, ModelProvider, Node, NodeAttributes, NodeKind, SearchIntensity, WorkflowSnapshot,
};
use serde::{Deserialize, Serialize};

/// One entry of the remote knowledge-base list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub id: String,
    pub name: String,
}

/// The resolved configuration of one LLM-processing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmStage {
    pub node_id: String,
    pub provider: ModelProvider,
    pub model: String,
    pub prompt_template: String,
    pub output_format: String,
    pub knowledge_base: Option<String>,
    pub search_intensity: SearchIntensity,
}

impl LlmStage {
    fn from_node(node: &Node, config: &LlmConfig) -> Self {
        Self {
            node_id: node.id.clone(),
            provider: config.provider,
            model: config.model.clone(),
            prompt_template: config.prompt_template.clone(),
            output_format: config.output_format.clone(),
            knowledge_base: config.knowledge_base.clone(),
            search_intensity: config.search_intensity,
        }
    }
}

/// The full pipeline, staged in execution order, ready for JSON submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub input: String,
    pub context: Vec<LlmStage>,
    pub generation: Vec<LlmStage>,
    pub ensemble: LlmStage,
    pub validation: Vec<LlmStage>,
}

impl ExecutionRequest {
    /// Stages a snapshot for execution. The pipeline must hold its single
    /// input node, at least one generation node and the ensemble node;
    /// validation and context stages are optional.
    pub fn from_snapshot(snapshot: &WorkflowSnapshot) -> Result<Self, RequestError> {
        let input = snapshot
            .nodes
            .iter()
            .find(|n| n.kind == NodeKind::Input)
            .and_then(|n| match &n.attributes {
                NodeAttributes::Text { content } => Some(content.clone()),
                NodeAttributes::Llm(_) => None,
            })
            .ok_or_else(|| RequestError::Incomplete("no input node with content".to_string()))?;

        let generation = llm_stages(NodeKind::Generation, &snapshot.nodes);
        if generation.is_empty() {
            return Err(RequestError::Incomplete(
                "at least one generation node is required".to_string(),
            ));
        }

        let ensemble = llm_stages(NodeKind::Ensemble, &snapshot.nodes)
            .into_iter()
            .next()
            .ok_or_else(|| RequestError::Incomplete("the ensemble node is missing".to_string()))?;

        Ok(Self {
            input,
            context: llm_stages(NodeKind::Context, &snapshot.nodes),
            generation,
            ensemble,
            validation: llm_stages(NodeKind::Validation, &snapshot.nodes),
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn llm_stages(kind: NodeKind, nodes: &[Node]) -> Vec<LlmStage> {
    layer_members(kind, nodes)
        .filter_map(|node| match &node.attributes {
            NodeAttributes::Llm(config) => Some(LlmStage::from_node(node, config)),
            NodeAttributes::Text { .. } => None,
        })
        .collect()
}

/// One row of the final results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
}

/// The final payload returned by the remote executor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionResults {
    pub records: Vec<RequirementRecord>,
}

impl ExecutionResults {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
