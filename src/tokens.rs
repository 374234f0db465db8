use tiktoken_rs::{tokenizer, CoreBPE};

/// Maps text to a model token count. Implementations must be deterministic.
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;
}

/// BPE tokenizer from `tiktoken-rs`, chosen by model name.
pub struct TiktokenCounter {
    bpe: &'static CoreBPE,
}

impl TiktokenCounter {
    pub fn for_model(model: &str) -> Self {
        let tokenizer =
            tokenizer::get_tokenizer(model).unwrap_or(tokenizer::Tokenizer::Cl100kBase);
        let bpe = match tokenizer {
            tokenizer::Tokenizer::O200kHarmony => tiktoken_rs::o200k_harmony_singleton(),
            tokenizer::Tokenizer::O200kBase => tiktoken_rs::o200k_base_singleton(),
            tokenizer::Tokenizer::Cl100kBase => tiktoken_rs::cl100k_base_singleton(),
            tokenizer::Tokenizer::R50kBase => tiktoken_rs::r50k_base_singleton(),
            tokenizer::Tokenizer::P50kBase => tiktoken_rs::p50k_base_singleton(),
            tokenizer::Tokenizer::P50kEdit => tiktoken_rs::p50k_edit_singleton(),
            tokenizer::Tokenizer::Gpt2 => tiktoken_rs::r50k_base_singleton(),
        };
        Self { bpe }
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

/// Running token total checked against a hard ceiling.
#[derive(Debug, Clone, Copy)]
pub struct TokenBudget {
    limit: usize,
    used: usize,
}

impl TokenBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    pub fn charge(&mut self, tokens: usize) {
        self.used = self.used.saturating_add(tokens);
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The ceiling is exclusive: reaching it already exhausts the budget.
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}
