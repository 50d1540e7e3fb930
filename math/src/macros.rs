//! Internal macros for building the kernel table.

/// Expand a list of widths into an array of type-erased kernels, one
/// [`Width`](crate::kernel::Width) per entry, in the order given.
macro_rules! kernel_table {
    ($($n:literal),+ $(,)?) => {
        [$(&$crate::kernel::Width::<$n> as &dyn $crate::kernel::MontgomeryKernel),+]
    };
}
