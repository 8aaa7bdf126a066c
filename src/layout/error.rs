#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("malformed process graph: {reason}")]
    MalformedGraph { reason: String },

    #[error("actors `{first}` and `{second}` both map to lane id `{lane_id}`")]
    DuplicateLaneId {
        lane_id: String,
        first: String,
        second: String,
    },

    #[error("branch of gateway `{gateway}` never converges: walk loops back through `{node}`")]
    UnresolvedGatewayBranch { gateway: String, node: String },
}

impl LayoutError {
    pub(super) fn malformed(reason: impl Into<String>) -> Self {
        LayoutError::MalformedGraph {
            reason: reason.into(),
        }
    }
}
