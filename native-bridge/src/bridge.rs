use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use log::info;
use parking_lot::{const_mutex, Mutex};

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::context::ContextRef;

use crate::envelope::Envelope;
use crate::invoke::{CallKind, invoke_bridge, InvokeOutcome, OperandStack, ReceiverLocks};
use crate::loader::load_method_signatures;
use crate::method_area::{bind, MethodArea, MethodTableEntry, StartupError};
use crate::options::BridgeOptions;
use crate::registry::MethodSignatures;

/// A loaded and bound registry plus what the adapter needs at call time.
pub struct Bridge {
    options: BridgeOptions,
    signatures: MethodSignatures,
    method_area: MethodArea,
    receiver_locks: ReceiverLocks,
}

static GLOBAL_BRIDGE: OnceLock<Bridge> = OnceLock::new();
static GLOBAL_INSTALL: Mutex<()> = const_mutex(());
static GLOBAL_STARTS: AtomicUsize = AtomicUsize::new(0);

impl Bridge {
    pub fn start(options: BridgeOptions) -> Result<Self, StartupError> {
        let signatures = load_method_signatures(options.load_mode());
        Self::from_signatures(options, signatures)
    }

    pub fn from_signatures(options: BridgeOptions, signatures: MethodSignatures) -> Result<Self, StartupError> {
        let mut method_area = MethodArea::new();
        let bound = bind(&signatures, &mut method_area)?;
        info!("native bridge ready: {} methods bound in {:?} mode", bound, options.load_mode());
        Ok(Self { options, signatures, method_area, receiver_locks: ReceiverLocks::new() })
    }

    /// Starts the process-wide bridge on first call. Later calls return the existing one and
    /// ignore `options`. Concurrent first calls load and bind only once.
    pub fn install_global(options: BridgeOptions) -> Result<&'static Bridge, StartupError> {
        if let Some(bridge) = GLOBAL_BRIDGE.get() {
            return Ok(bridge);
        }
        let _installing = GLOBAL_INSTALL.lock();
        if let Some(bridge) = GLOBAL_BRIDGE.get() {
            return Ok(bridge);
        }
        let bridge = Self::start(options)?;
        GLOBAL_STARTS.fetch_add(1, Ordering::SeqCst);
        Ok(GLOBAL_BRIDGE.get_or_init(|| bridge))
    }

    pub fn global() -> Option<&'static Bridge> {
        GLOBAL_BRIDGE.get()
    }

    /// How many times `install_global` has loaded a registry.
    pub fn global_starts() -> usize {
        GLOBAL_STARTS.load(Ordering::SeqCst)
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    pub fn signatures(&self) -> &MethodSignatures {
        &self.signatures
    }

    pub fn method_area(&self) -> &MethodArea {
        &self.method_area
    }

    pub fn resolve(&self, key: &str) -> Option<&MethodTableEntry> {
        self.method_area.resolve(key)
    }

    pub fn invoke(&self, key: &str, call_kind: CallKind, stack: &mut OperandStack, context: &ContextRef) -> InvokeOutcome {
        match self.resolve(key) {
            None => InvokeOutcome::Raised(Envelope::new(ExceptionKind::NoSuchMethodException, format!("no bridge method for {}", key))),
            Some(entry) => invoke_bridge(entry, call_kind, stack, context, &self.receiver_locks, &self.options),
        }
    }
}
