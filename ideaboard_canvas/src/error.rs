// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::id::ElementId;

/// Errors from the host-facing administrative calls of [`Canvas`](crate::Canvas).
///
/// Input handling never fails; see the crate docs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    /// An element with this id is already on the canvas.
    #[error("element `{0}` is already on the canvas")]
    DuplicateId(ElementId),
    /// No element with this id is on the canvas.
    #[error("element `{0}` is not on the canvas")]
    UnknownElement(ElementId),
}
