/// Run a block inside a parameter scope.
///
/// `set` lines stage overrides; the rest of the block runs with the scope
/// entered, and the scope is exited on every path out of the block.
///
/// ```
/// use hyperscope_core::{params, with_scope};
///
/// with_scope! {
///     set "model.depth" = 12;
///     set "model.lr" = 0.1;
///
///     assert_eq!(params().key("model.depth").i64_or(0), 12);
/// }
/// assert_eq!(params().key("model.depth").i64_or(0), 0);
/// ```
#[macro_export]
macro_rules! with_scope {
    (set $key:literal = $val:expr; $($rest:tt)*) => {{
        let __scope = $crate::Scope::new().set($key, $val);
        $crate::with_scope!(@staged __scope; $($rest)*)
    }};

    (@staged $scope:expr; set $key:literal = $val:expr; $($rest:tt)*) => {{
        let __scope = $scope.set($key, $val);
        $crate::with_scope!(@staged __scope; $($rest)*)
    }};

    (@staged $scope:expr; $($body:tt)*) => {{
        let __guard = $scope.enter();
        let __ret = { $($body)* };
        drop(__guard);
        __ret
    }};

    ($($body:tt)*) => {{
        let __guard = $crate::Scope::new().enter();
        let __ret = { $($body)* };
        drop(__guard);
        __ret
    }};
}
