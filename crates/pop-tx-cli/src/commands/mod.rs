// SPDX-License-Identifier: GPL-3.0

pub(crate) mod decode;
pub(crate) mod gas;
pub(crate) mod percent;
pub(crate) mod send;
