use openssl::{stack::Stack, x509::X509};

// CA certificate order: as decoded from the container, leaf issuer first
// when the container was written with an ordered chain.
#[derive(Debug)]
pub struct CaChain {
    chain: Vec<X509>,
}

impl CaChain {
    /// Copies every certificate out of the engine's transient stack into an
    /// owned list, preserving decode order. The stack itself is dropped
    /// here, releasing the engine handle.
    pub(crate) fn from_stack(stack: Option<Stack<X509>>) -> Self {
        let chain = match stack {
            Some(stack) => stack.iter().map(|cert| cert.to_owned()).collect(),
            None => Vec::new(),
        };
        CaChain { chain }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&X509> {
        self.chain.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, X509> {
        self.chain.iter()
    }

    pub fn certs(&self) -> &[X509] {
        &self.chain
    }
}

impl<'a> IntoIterator for &'a CaChain {
    type Item = &'a X509;
    type IntoIter = std::slice::Iter<'a, X509>;

    fn into_iter(self) -> Self::IntoIter {
        self.chain.iter()
    }
}
