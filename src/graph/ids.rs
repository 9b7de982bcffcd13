use rand::Rng;

/// Mints node and edge identifiers for one editing session.
///
/// Each generator picks a random session suffix once and then counts up, so
/// ids never repeat within a session and collide across sessions only if two
/// sessions draw the same 32-bit suffix.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    session: u32,
    counter: u64,
    node_prefix: String,
    edge_prefix: String,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_prefixes("node", "edge")
    }

    pub fn with_prefixes(node_prefix: impl Into<String>, edge_prefix: impl Into<String>) -> Self {
        Self {
            session: rand::rng().random(),
            counter: 0,
            node_prefix: node_prefix.into(),
            edge_prefix: edge_prefix.into(),
        }
    }

    /// Fixed session suffix, for reproducible ids in tests and tooling.
    pub fn with_session(mut self, session: u32) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> u32 {
        self.session
    }

    pub fn next_node_id(&mut self) -> String {
        let n = self.bump();
        format!("{}_{:08x}_{}", self.node_prefix, self.session, n)
    }

    pub fn next_edge_id(&mut self) -> String {
        let n = self.bump();
        format!("{}_{:08x}_{}", self.edge_prefix, self.session, n)
    }

    fn bump(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
