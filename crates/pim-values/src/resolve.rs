//! Code-to-entity resolution shared by the option and reference-data
//! factories.

/// What to do with codes the repository does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedCodes {
    /// Drop unknown codes; an all-unknown input resolves to nothing.
    Skip,
    /// Drop unknown codes, but fail when codes were given and none resolved.
    #[default]
    FailWhenNoneResolved,
}

/// Every supplied code failed to resolve under
/// [`UnresolvedCodes::FailWhenNoneResolved`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoneResolved {
    pub codes: Vec<String>,
}

/// Resolves `codes` in order through `lookup`.
///
/// `on_miss` is called once per unknown code, before any failure is
/// reported, so callers can log each miss.
///
/// # Errors
///
/// Returns [`NoneResolved`] carrying all supplied codes when `policy` is
/// [`UnresolvedCodes::FailWhenNoneResolved`], `codes` is non-empty and no
/// code resolved.
pub fn resolve_codes<T>(
    codes: &[String],
    policy: UnresolvedCodes,
    mut lookup: impl FnMut(&str) -> Option<T>,
    mut on_miss: impl FnMut(&str),
) -> Result<Vec<T>, NoneResolved> {
    let mut found = Vec::with_capacity(codes.len());

    for code in codes {
        match lookup(code) {
            Some(entity) => found.push(entity),
            None => on_miss(code),
        }
    }

    if found.is_empty() && !codes.is_empty() && policy == UnresolvedCodes::FailWhenNoneResolved {
        return Err(NoneResolved {
            codes: codes.to_vec(),
        });
    }

    Ok(found)
}
