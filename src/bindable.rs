use crate::field::{FieldKind, FloatWidth, IntWidth, LeafSlot, OptionalSlot, Slot};
use std::collections::{BTreeMap, HashMap};

/// A type that can occupy a field of a bound record
///
/// Implemented for the supported leaf types, `Option<T>`, `Vec<T>`, maps and
/// every `#[derive(EnvRecord)]` struct. Types that compile but cannot be bound
/// (maps, sequences of anything but `String`) produce [`Slot::Unsupported`] so
/// the binder reports them instead of skipping them.
pub trait Bindable: Sized {
    /// Declared kind of this type
    fn kind() -> FieldKind;

    /// Typed access to a value of this type
    fn slot(&mut self) -> Slot<'_>;

    /// Value written into a vacant `Option<Self>` before assignment
    fn vacant() -> Option<Self> {
        None
    }

    /// Typed access to a `Vec<Self>`
    #[doc(hidden)]
    fn sequence_slot(_items: &mut Vec<Self>) -> Slot<'_> {
        Slot::Unsupported(FieldKind::Sequence(Box::new(Self::kind())))
    }
}

macro_rules! leaf {
    ($ty:ty, $variant:ident, $kind:expr) => {
        impl Bindable for $ty {
            fn kind() -> FieldKind {
                $kind
            }

            fn slot(&mut self) -> Slot<'_> {
                Slot::Leaf(LeafSlot::$variant(self))
            }

            fn vacant() -> Option<Self> {
                Some(<$ty>::default())
            }
        }
    };
}

leaf!(bool, Bool, FieldKind::Bool);
leaf!(i8, I8, FieldKind::Signed(IntWidth::W8));
leaf!(i16, I16, FieldKind::Signed(IntWidth::W16));
leaf!(i32, I32, FieldKind::Signed(IntWidth::W32));
leaf!(i64, I64, FieldKind::Signed(IntWidth::W64));
leaf!(isize, Isize, FieldKind::Signed(IntWidth::Size));
leaf!(u8, U8, FieldKind::Unsigned(IntWidth::W8));
leaf!(u16, U16, FieldKind::Unsigned(IntWidth::W16));
leaf!(u32, U32, FieldKind::Unsigned(IntWidth::W32));
leaf!(u64, U64, FieldKind::Unsigned(IntWidth::W64));
leaf!(usize, Usize, FieldKind::Unsigned(IntWidth::Size));
leaf!(f32, F32, FieldKind::Float(FloatWidth::W32));
leaf!(f64, F64, FieldKind::Float(FloatWidth::W64));

impl Bindable for String {
    fn kind() -> FieldKind {
        FieldKind::Text
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(LeafSlot::Text(self))
    }

    fn vacant() -> Option<Self> {
        Some(String::new())
    }

    fn sequence_slot(items: &mut Vec<Self>) -> Slot<'_> {
        Slot::Leaf(LeafSlot::TextList(items))
    }
}

impl<T: Bindable> Bindable for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Sequence(Box::new(T::kind()))
    }

    fn slot(&mut self) -> Slot<'_> {
        T::sequence_slot(self)
    }

    fn vacant() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<T: Bindable> Bindable for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Optional(self)
    }
}

impl<T: Bindable> OptionalSlot for Option<T> {
    fn is_occupied(&self) -> bool {
        self.is_some()
    }

    fn get(&mut self) -> Option<Slot<'_>> {
        self.as_mut().map(Bindable::slot)
    }

    fn allocate(&mut self) -> Option<Slot<'_>> {
        if self.is_none() {
            *self = Some(T::vacant()?);
        }
        self.get()
    }

    fn clear(&mut self) {
        *self = None;
    }
}

impl<K, V, S> Bindable for HashMap<K, V, S> {
    fn kind() -> FieldKind {
        FieldKind::Map
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(FieldKind::Map)
    }
}

impl<K, V> Bindable for BTreeMap<K, V> {
    fn kind() -> FieldKind {
        FieldKind::Map
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(FieldKind::Map)
    }
}
