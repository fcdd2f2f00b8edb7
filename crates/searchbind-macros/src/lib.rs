//! Proc macros for searchbind.
//!
//! # Available Macros
//!
//! - [`Bindable`] - Generate a cached field descriptor so search-result field
//!   maps can be bound onto the struct
//!
//! Generated code refers to `::searchbind_binder`, so the deriving crate must
//! depend on `searchbind-binder` directly.

mod bind;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `Bindable` for a struct with named fields.
///
/// Each field carrying a `#[bind(...)]` attribute is registered in the
/// struct's descriptor under its tag. Fields without the attribute are never
/// touched by binding.
///
/// # Field Attributes
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | `#[bind]` | Tag is the Rust field name |
/// | `#[bind("name")]` | Tag is `name` |
/// | `#[bind(tag = "name")]` | Same as above |
/// | `#[bind("-")]` | Excluded (ignore sentinel) |
/// | `#[bind(skip)]` | Excluded |
///
/// # Supported Field Types
///
/// | Type | Source value |
/// |------|--------------|
/// | `i8`..`i64`, `isize`, `u8`..`u64`, `usize` | integer |
/// | `f64` | float |
/// | `f32` | float within `f32` range |
/// | `String` | string |
/// | `bool` | bool |
/// | another `Bindable` struct | mapping |
/// | `Option<T>` with `T: Bindable` | mapping (bound only when `Some`) |
/// | `Vec<T>` with `T: Bindable + Default` | sequence of mappings |
/// | `Box<T>` of any of the above | as `T` |
///
/// # Generated Code
///
/// - `impl Bindable`, caching its `Descriptor` in a static
/// - `impl BindField`, so the struct can be nested in other bindable structs
/// - One `pub const` per tag in SCREAMING_SNAKE_CASE (`attachmentCount` becomes
///   `ATTACHMENT_COUNT`)
///
/// # Example
///
/// ```ignore
/// use searchbind_binder::bind;
/// use searchbind_macros::Bindable;
///
/// #[derive(Bindable, Default)]
/// struct Attachment {
///     #[bind]
///     name: String,
///     #[bind]
///     size: u64,
/// }
///
/// #[derive(Bindable, Default)]
/// struct Mail {
///     #[bind("subject")]
///     subject: String,
///
///     #[bind(tag = "attachmentCount")]
///     attachment_count: i64,
///
///     #[bind]
///     attachments: Vec<Attachment>,
///
///     // Never bound
///     local_flag: bool,
/// }
///
/// assert_eq!(Mail::ATTACHMENT_COUNT, "attachmentCount");
///
/// let mut mail = Mail::default();
/// bind(&mut mail, &fields)?;
/// ```
///
/// # Compile-Time Errors
///
/// - Deriving on enums, tuple structs, or generic structs
/// - Two fields sharing one tag
/// - Empty tags or unknown attribute keys
/// - Field types without a `BindField` implementation
#[proc_macro_derive(Bindable, attributes(bind))]
pub fn bindable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    bind::bindable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
