//! Live ID generator.

use uuid::Uuid;

use crate::ports::IdGenerator;

/// Produces random v4 UUIDs.
#[derive(Default)]
pub struct LiveIdGenerator;

impl IdGenerator for LiveIdGenerator {
    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_unique_uuids() {
        let gen = LiveIdGenerator;
        let a = gen.generate_id();
        let b = gen.generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
