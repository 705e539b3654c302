//! `tracktools` is a semi-modular toolkit for post-processing groundwater
//! particle tracking runs into mixing ratio estimates
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use tracktools_format as format;

#[cfg(feature = "budget")]
#[cfg_attr(docsrs, doc(cfg(feature = "budget")))]
#[doc(inline)]
pub use tracktools_budget as budget;

#[cfg(feature = "forward")]
#[cfg_attr(docsrs, doc(cfg(feature = "forward")))]
#[doc(inline)]
pub use tracktools_forward as forward;

#[cfg(feature = "grid")]
#[cfg_attr(docsrs, doc(cfg(feature = "grid")))]
#[doc(inline)]
pub use tracktools_grid as grid;

#[cfg(feature = "mixing")]
#[cfg_attr(docsrs, doc(cfg(feature = "mixing")))]
#[doc(inline)]
pub use tracktools_mixing as mixing;

#[cfg(feature = "modpath")]
#[cfg_attr(docsrs, doc(cfg(feature = "modpath")))]
#[doc(inline)]
pub use tracktools_modpath as modpath;
