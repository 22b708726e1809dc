use alloc::{
    borrow::Cow,
    boxed::Box,
    collections::{BTreeMap, BTreeSet, VecDeque},
    rc::Rc,
    string::String,
    sync::Arc,
    vec::Vec,
};
use core::{
    any::{type_name, Any, TypeId},
    cell::{Cell, RefCell},
    fmt,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicBool, AtomicI32, AtomicI64, AtomicU32, AtomicU64, AtomicUsize},
    time::Duration,
};
use std::{
    collections::{HashMap, HashSet},
    ffi::OsString,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6},
    path::PathBuf,
    sync::{Mutex, RwLock},
    time::{Instant, SystemTime},
};

/// Canonical key of a dependency inside a [`Container`](crate::Container).
///
/// Two identities are equal when they were derived from the same type. The
/// fully qualified type name is carried along for diagnostics only.
#[derive(Clone, Copy)]
pub struct Identity {
    id: TypeId,
    name: &'static str,
}

impl Identity {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.name)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Anything which can be requested from a [`Container`](crate::Container).
///
/// `Target` is the type a registration is stored as. Optional shells forward
/// to their inner type, so `Option<T>` and `T` share one registration:
/// ```
/// use providence::identity_of;
/// use std::sync::Arc;
///
/// assert_eq!(identity_of::<Arc<str>>(), identity_of::<Option<Arc<str>>>());
/// assert_eq!(identity_of::<u8>(), identity_of::<Option<Option<u8>>>());
/// ```
///
/// Own types opt in with [`dependency!`](crate::dependency).
pub trait Dependency: Sized + 'static {
    type Target: Any;

    fn identity() -> Identity {
        Identity::of::<Self::Target>()
    }

    fn from_target(target: Self::Target) -> Self;

    /// Value used if nothing is registered. `None` means the dependency is required.
    fn absent() -> Option<Self> {
        None
    }
}

impl<D: Dependency> Dependency for Option<D> {
    type Target = D::Target;

    fn identity() -> Identity {
        D::identity()
    }

    fn from_target(target: Self::Target) -> Self {
        Some(D::from_target(target))
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: ?Sized + 'static> Dependency for Arc<T> {
    type Target = Self;

    fn from_target(target: Self) -> Self {
        target
    }
}

impl<T: ?Sized + 'static> Dependency for Box<T> {
    type Target = Self;

    fn from_target(target: Self) -> Self {
        target
    }
}

impl<T: ?Sized + 'static> Dependency for Rc<T> {
    type Target = Self;

    fn from_target(target: Self) -> Self {
        target
    }
}

macro_rules! generic_dependency {
    ($(<$($param:ident),+> $ty:ty;)+) => {
        $(
            impl<$($param: 'static),+> Dependency for $ty {
                type Target = Self;

                fn from_target(target: Self) -> Self {
                    target
                }
            }
        )+
    };
}

generic_dependency! {
    <T> Vec<T>;
    <T> VecDeque<T>;
    <T> BTreeSet<T>;
    <K, V> BTreeMap<K, V>;
    <T, S> HashSet<T, S>;
    <K, V, S> HashMap<K, V, S>;
    <T> Cell<T>;
    <T> RefCell<T>;
    <T> Mutex<T>;
    <T> RwLock<T>;
    <A, B> (A, B);
    <A, B, C> (A, B, C);
    <A, B, C, D> (A, B, C, D);
}

/// Derives the identity `D` is registered and resolved under.
pub fn identity_of<D: Dependency>() -> Identity {
    D::identity()
}

/// Implements [`Dependency`] for types which are resolved as themselves.
///
/// Only types of the calling crate can be listed. Types of other crates need a newtype, or are
/// registered behind an `Arc`/`Box`, which are dependencies for any content. Common std types
/// (primitives, collections, `Duration`, `PathBuf`, addresses, locks, small tuples...) are
/// dependencies out of the box.
///
/// ```
/// #[derive(Clone)]
/// struct Settings { verbose: bool }
/// providence::dependency!(Settings);
///
/// let container = providence::Container::new();
/// container.register_shared(Settings { verbose: true });
/// assert!(container.resolve::<Settings>().verbose);
/// ```
#[macro_export]
macro_rules! dependency {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Dependency for $ty {
                type Target = Self;

                fn from_target(target: Self) -> Self {
                    target
                }
            }
        )+
    };
}

dependency!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String,
    &'static str,
    Cow<'static, str>,
    OsString,
    PathBuf,
    Duration,
    Instant,
    SystemTime,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    SocketAddr,
    SocketAddrV4,
    SocketAddrV6,
    AtomicBool,
    AtomicI32,
    AtomicI64,
    AtomicU32,
    AtomicU64,
    AtomicUsize,
);
