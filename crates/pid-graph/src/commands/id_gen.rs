//! Manual-id generation (spec.md §9): `node_manual_<k>`, confined to one
//! editor instance and monotonic within the session. A per-session nonce
//! keeps ids from colliding when documents produced by different editor
//! instances are merged.

#[derive(Clone, Debug)]
pub struct IdGenerator {
    nonce: String,
    next: u64,
}

impl IdGenerator {
    pub fn new(nonce: impl Into<String>) -> Self {
        Self { nonce: nonce.into(), next: 0 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("node_manual_{}_{}", self.nonce, self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_carry_the_session_nonce() {
        let mut gen = IdGenerator::new("s1");
        assert_eq!(gen.next_id(), "node_manual_s1_0");
        assert_eq!(gen.next_id(), "node_manual_s1_1");
    }
}
