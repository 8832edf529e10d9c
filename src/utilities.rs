/// `retrieve!` consumes a builder by fetching `resource` and returning owned.
#[macro_export]
macro_rules! retrieve {
    ($resource: expr) => {{
        let result =
            std::mem::replace(&mut $resource, None).ok_or($crate::error::Error::Internal {
                message: format!("{} missing", stringify!($resource)),
            })?;
        result
    }};
}
