/*!
 * Mock rewrite provider for testing.
 *
 * Simulates different provider behaviors:
 * - `MockRewriter::identity()` - Returns the input unchanged
 * - `MockRewriter::failing()` - Always fails with a transport error
 * - `MockRewriter::empty()` - Returns an empty body
 * - `MockRewriter::truncating()` - Drops all but the first entry block
 */

// Allow dead code - the mock is only constructed by tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::RewriteError;
use crate::providers::RewriteProvider;

/// Behavior mode for the mock rewriter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Return the input text unchanged
    Identity,
    /// Always fail with a transport error
    Failing,
    /// Return an empty response body
    Empty,
    /// Return only the first entry block, breaking the structure
    Truncated,
}

/// Mock provider for testing rewrite-pass behavior. Clones share the call
/// counter, so a test can keep a handle after moving the provider.
#[derive(Debug, Clone)]
pub struct MockRewriter {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of rewrite calls received
    request_count: Arc<AtomicUsize>,
}

impl MockRewriter {
    /// Create a new mock rewriter with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        MockRewriter {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that echoes its input
    pub fn identity() -> Self {
        Self::new(MockBehavior::Identity)
    }

    /// Mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Mock that returns an empty body
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Mock that drops all but the first entry block
    pub fn truncating() -> Self {
        Self::new(MockBehavior::Truncated)
    }

    /// Number of rewrite calls this mock has received
    pub fn requests(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RewriteProvider for MockRewriter {
    async fn rewrite(&self, subtitle_text: &str, _target_dialect: &str) -> Result<String, RewriteError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Identity => Ok(subtitle_text.to_string()),
            MockBehavior::Failing => Err(RewriteError::RequestFailed("mock transport failure".to_string())),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Truncated => {
                let first_block = subtitle_text
                    .trim()
                    .split("\n\n")
                    .next()
                    .unwrap_or_default()
                    .to_string();
                Ok(first_block)
            }
        }
    }
}
