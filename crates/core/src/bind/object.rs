//! Statically declared object schemas.
//!
//! A [`Bindable`] type lists its members once, each with an alias key, a
//! namespace, and an accessor returning `&mut` to the field. The accessor
//! doubles as getter (the field's current value is the fallback default) and
//! setter. Post-bind hooks run after every member is bound, when a namespace-1
//! switch carries the hook's name.
//!
//! ```
//! use switchbind_core::{Bindable, ObjectSchema};
//!
//! #[derive(Debug, Default)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     verbose: bool,
//!     reset_count: u32,
//! }
//!
//! impl Bindable for Server {
//!     fn schema() -> ObjectSchema<Self> {
//!         ObjectSchema::<Self>::new()
//!             .field("host|h", |s| &mut s.host)
//!             .field("port", |s| &mut s.port)
//!             .field("verbose|v", |s| &mut s.verbose)
//!             .hook("reset", |s| s.reset_count += 1)
//!     }
//! }
//!
//! let server: Server = switchbind_core::from_args(&["-h:example.org", "-port=8080", "-v", "-reset"]).unwrap();
//! assert_eq!(server.host, "example.org");
//! assert_eq!(server.port, 8080);
//! assert!(server.verbose);
//! assert_eq!(server.reset_count, 1);
//! ```

use std::fmt;

use crate::bind::{Bind, Binder, Shape, Slot, default_namespace_has};
use crate::error::Result;
use crate::grammar::MEMBER_PAIR_SEPARATORS;
use crate::index::{DEFAULT_NAMESPACE, SwitchIndex};

/// An object type bindable member by member.
pub trait Bindable: Default + 'static {
    /// Members and hooks of the type, in declaration order.
    fn schema() -> ObjectSchema<Self>;
}

type Assign<T> = Box<dyn Fn(&Binder, &SwitchIndex, &mut T) -> Result<()> + Send + Sync>;

/// One bindable member of an object schema.
pub struct Member<T> {
    key: &'static str,
    namespace: usize,
    shape: Shape,
    assign: Assign<T>,
}

impl<T> Member<T> {
    /// Alias key (`"o|out"`).
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Namespace the member is looked up in.
    pub fn namespace(&self) -> usize {
        self.namespace
    }

    /// Shape of the member's type.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("key", &self.key)
            .field("namespace", &self.namespace)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// A zero-argument callback run after binding.
pub struct Hook<T> {
    name: &'static str,
    run: fn(&mut T),
}

impl<T> Hook<T> {
    /// Switch name that triggers the hook.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Members and hooks of a [`Bindable`] type.
pub struct ObjectSchema<T> {
    members: Vec<Member<T>>,
    hooks: Vec<Hook<T>>,
}

impl<T: 'static> ObjectSchema<T> {
    /// Empty schema.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Member `key` in the default namespace.
    #[must_use]
    pub fn field<F: Bind>(self, key: &'static str, access: fn(&mut T) -> &mut F) -> Self {
        self.field_in(key, DEFAULT_NAMESPACE, access)
    }

    /// Member `key` in `namespace`.
    #[must_use]
    pub fn field_in<F: Bind>(
        mut self,
        key: &'static str,
        namespace: usize,
        access: fn(&mut T) -> &mut F,
    ) -> Self {
        let assign: Assign<T> = Box::new(move |binder, index, target| {
            let field = access(target);
            let current = std::mem::take(field);
            *field = binder.member(index, key, namespace, current)?;
            Ok(())
        });
        self.members.push(Member {
            key,
            namespace,
            shape: F::shape(),
            assign,
        });
        self
    }

    /// Post-bind hook run when switch `name` is present in namespace 1.
    ///
    /// Hook names match case-insensitively; hooks run in declaration order.
    #[must_use]
    pub fn hook(mut self, name: &'static str, run: fn(&mut T)) -> Self {
        self.hooks.push(Hook { name, run });
        self
    }

    /// Declared members.
    pub fn members(&self) -> &[Member<T>] {
        &self.members
    }

    /// Declared hooks.
    pub fn hooks(&self) -> &[Hook<T>] {
        &self.hooks
    }
}

impl<T: 'static> Default for ObjectSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectSchema")
            .field("members", &self.members)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl<T: Bindable> Bind for T {
    fn shape() -> Shape {
        Shape::Object {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Nested object: the raw value is an embedded command line bound onto
    /// `current`. A bare switch leaves `current` untouched.
    fn bind_slot(binder: &Binder, index: &SwitchIndex, slot: Slot<'_>, current: Self) -> Result<Self> {
        let Some(raw) = slot.raw(index) else {
            return Ok(current);
        };
        let sub = index.parse_pairs(raw, MEMBER_PAIR_SEPARATORS)?;
        binder.bind_onto(&sub, current)
    }
}

/// Bind every present member of `schema`, then run the matching hooks.
pub(crate) fn bind_object<T: Bindable>(
    binder: &Binder,
    index: &SwitchIndex,
    schema: &ObjectSchema<T>,
    mut target: T,
) -> Result<T> {
    for member in &schema.members {
        if !index.contains(member.key, member.namespace) {
            continue;
        }
        tracing::trace!(member = member.key, namespace = member.namespace, "binding member");
        (member.assign)(binder, index, &mut target)?;
    }
    for hook in &schema.hooks {
        if default_namespace_has(index, hook.name) {
            tracing::trace!(hook = hook.name, "running post-bind hook");
            (hook.run)(&mut target);
        }
    }
    Ok(target)
}
