//! Engine configuration

use qgrad_linalg::KernelConfig;

/// Relative tolerance of the optional norm check after the forward pass
pub const NORM_TOLERANCE: f64 = 1e-8;

/// Configuration for the adjoint Jacobian engine
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianConfig {
    /// Run the circuit on the input state before differentiating
    ///
    /// Set to false when the caller passes a state that has already been
    /// evolved through the circuit.
    ///
    /// Default: true
    pub apply_forward_pass: bool,

    /// Process the per-observable bras on the rayon pool
    ///
    /// Default: false
    pub parallel_observables: bool,

    /// Kernel configuration for the inner products
    ///
    /// Default: `KernelConfig::default()`
    pub kernel: KernelConfig,

    /// Verify that the forward pass preserved the norm
    ///
    /// Default: false
    pub check_norm: bool,
}

impl Default for JacobianConfig {
    fn default() -> Self {
        Self {
            apply_forward_pass: true,
            parallel_observables: false,
            kernel: KernelConfig::default(),
            check_norm: false,
        }
    }
}

impl JacobianConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything on the calling thread
    pub fn sequential() -> Self {
        Self {
            kernel: KernelConfig::sequential(),
            ..Default::default()
        }
    }

    /// Observables and inner products spread over the rayon pool
    pub fn parallel() -> Self {
        Self {
            parallel_observables: true,
            kernel: KernelConfig::from_available_parallelism(),
            ..Default::default()
        }
    }

    /// Sequential, with the norm check enabled
    pub fn debug() -> Self {
        Self {
            check_norm: true,
            ..Self::sequential()
        }
    }

    /// Enable or disable the forward pass
    pub fn with_forward_pass(mut self, enabled: bool) -> Self {
        self.apply_forward_pass = enabled;
        self
    }

    /// Enable or disable parallel processing of observables
    pub fn with_parallel_observables(mut self, enabled: bool) -> Self {
        self.parallel_observables = enabled;
        self
    }

    /// Set the kernel configuration
    pub fn with_kernel(mut self, kernel: KernelConfig) -> Self {
        self.kernel = kernel;
        self
    }

    /// Enable or disable the norm check
    pub fn with_norm_check(mut self, enabled: bool) -> Self {
        self.check_norm = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.kernel.validate().map_err(|e| format!("kernel: {}", e))
    }
}
