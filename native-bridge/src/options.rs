#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoadMode {
    /// Traps followed by every intrinsic loader.
    Full,
    /// Only the synthetic probe signatures.
    TestOnly,
}

#[derive(Debug, Clone)]
pub struct BridgeOptions {
    pub(crate) load_mode: LoadMode,
    pub(crate) trace_invocations: bool,
    pub(crate) check_return_kinds: bool,
}

impl BridgeOptions {
    pub fn new(load_mode: LoadMode, trace_invocations: bool, check_return_kinds: bool) -> Self {
        Self { load_mode, trace_invocations, check_return_kinds }
    }

    pub fn test_only() -> Self {
        Self { load_mode: LoadMode::TestOnly, ..Self::default() }
    }

    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    pub fn trace_invocations(&self) -> bool {
        self.trace_invocations
    }

    pub fn check_return_kinds(&self) -> bool {
        self.check_return_kinds
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            load_mode: LoadMode::Full,
            trace_invocations: false,
            check_return_kinds: true,
        }
    }
}
