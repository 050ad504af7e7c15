/// Builds a [`SurfValue`](crate::SurfValue) from a literal description.
///
/// - `*Name { "prop": value, … }` builds a named object
/// - `[a, b, …]` builds a list
/// - `{ key: value, … }` builds a map
/// - anything else goes through `SurfValue::from`
///
/// Values that span more than one token (negative numbers, nested objects,
/// expressions) must be wrapped in parentheses.
///
/// ```rust
/// use surf_writer::{surf, SurfObject, SurfValue};
///
/// let value = surf!(*Complex {
///     "foo": "foo",
///     "bar": (*Simple { "foo": "foo" }),
///     "offset": (-2)
/// });
///
/// let object = value.as_object().unwrap();
/// assert_eq!(object.type_name(), "Complex");
/// assert_eq!(object.property("offset"), Some(&SurfValue::from(-2)));
/// ```
#[macro_export]
macro_rules! surf {
    (true) => {
        $crate::SurfValue::Boolean(true)
    };

    (false) => {
        $crate::SurfValue::Boolean(false)
    };

    ([]) => {
        $crate::SurfValue::List(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::SurfValue::List(vec![$($crate::surf!($elem)),*])
    };

    ({}) => {
        $crate::SurfValue::Map($crate::SurfMap::new())
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {{
        let mut map = $crate::SurfMap::new();
        $(
            map.insert($crate::surf!($key), $crate::surf!($value));
        )*
        $crate::SurfValue::Map(map)
    }};

    (* $name:ident {}) => {
        $crate::SurfValue::Object($crate::SurfObject::new(stringify!($name)))
    };

    (* $name:ident { $($prop:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::SurfObject::new(stringify!($name));
        $(
            object.set_property($prop, $crate::surf!($value));
        )*
        $crate::SurfValue::Object(object)
    }};

    (( $($inner:tt)+ )) => {
        $crate::surf!($($inner)+)
    };

    ($other:expr) => {
        $crate::SurfValue::from($other)
    };
}

/// Implements [`Reflect`](crate::Reflect) for a struct, reporting the listed
/// fields as properties in the order given.
///
/// The object type name defaults to the struct name; `as "Name"` overrides it.
/// A field can be reported under another property name with
/// `field as "name"`. Every listed field must itself implement `Reflect`.
///
/// ```rust
/// use surf_writer::{surf, surf_record, to_value};
///
/// struct Account {
///     owner: String,
///     balance_cents: i64,
///     nickname: Option<String>,
/// }
///
/// surf_record!(Account as "BankAccount" {
///     owner,
///     balance_cents as "balance",
///     nickname,
/// });
///
/// let account = Account {
///     owner: "ana".to_string(),
///     balance_cents: 1200,
///     nickname: None,
/// };
/// assert_eq!(
///     to_value(&account).unwrap(),
///     Some(surf!(*BankAccount { "owner": "ana", "balance": 1200 }))
/// );
/// ```
#[macro_export]
macro_rules! surf_record {
    (@property $field:ident) => {
        stringify!($field)
    };

    (@property $field:ident $name:literal) => {
        $name
    };

    ($ty:ident $(as $type_name:literal)? { $($field:ident $(as $name:literal)?),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            $(
                fn type_name(&self) -> &'static str {
                    $type_name
                }
            )?

            fn introspect(
                &self,
                visitor: &mut dyn $crate::PropertyVisitor,
            ) -> $crate::Result<()> {
                let _ = &visitor;
                $(
                    visitor.visit_property(
                        $crate::surf_record!(@property $field $($name)?),
                        &self.$field,
                    )?;
                )*
                Ok(())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{SurfMap, SurfObject, SurfValue};

    #[test]
    fn test_surf_macro_primitives() {
        assert_eq!(surf!(true), SurfValue::Boolean(true));
        assert_eq!(surf!(false), SurfValue::Boolean(false));
        assert_eq!(surf!(42), SurfValue::from(42));
        assert_eq!(surf!((-7)), SurfValue::from(-7));
        assert_eq!(surf!("hello"), SurfValue::String("hello".to_string()));
        assert_eq!(surf!('c'), SurfValue::Character('c'));
    }

    #[test]
    fn test_surf_macro_lists_and_maps() {
        assert_eq!(surf!([]), SurfValue::List(vec![]));
        assert_eq!(
            surf!([1, "a"]),
            SurfValue::List(vec![SurfValue::from(1), SurfValue::from("a")])
        );

        let mut expected = SurfMap::new();
        expected.insert(SurfValue::from(1), SurfValue::from("one"));
        assert_eq!(surf!({ 1: "one" }), SurfValue::Map(expected));
        assert_eq!(surf!({}), SurfValue::Map(SurfMap::new()));
    }

    #[test]
    fn test_surf_macro_objects() {
        assert_eq!(
            surf!(*Empty {}),
            SurfValue::Object(SurfObject::new("Empty"))
        );

        let mut expected = SurfObject::new("Point");
        expected.set_property("x", 1);
        expected.set_property("y", 2);
        assert_eq!(
            surf!(*Point { "x": 1, "y": 2 }),
            SurfValue::Object(expected)
        );
    }
}
