/// The backend decides what history looks like, so we keep it as plain JSON.
pub type Resp = serde_json::Value;

/// Where the history endpoint lives.
pub const PATH: &str = "/history";
