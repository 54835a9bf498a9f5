//! Capability seams between the host analyzer and the inference engine.
//!
//! The source ecosystem reaches these facts through deep inheritance
//! between repository and query types; here they are small composable
//! capabilities a host adapter implements directly.

use crate::{mode::ModeArgument, shape::ResultShape};

///
/// ResultShapeProvider
/// Yields the declared result shape bound to the call site's receiver.
///

pub trait ResultShapeProvider {
    /// The resolved shape, or `None` when the host could not produce one.
    fn result_shape(&self) -> Option<&ResultShape>;
}

///
/// ModeArgumentProvider
/// Yields constant-or-dynamic knowledge about argument expressions.
///

pub trait ModeArgumentProvider {
    /// The mode argument at `position`, or `None` when omitted.
    fn mode_argument(&self, position: u8) -> Option<ModeArgument>;
}
