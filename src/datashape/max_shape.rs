use crate::datashape::{Dim, ShapeError};

/// Compute the broadcast of several dimension vectors.
///
/// Shapes are aligned from their trailing dimensions. A missing dimension or a dimension
/// of size `1` unifies with anything; `var` unified with any other dimension stays `var`
/// (its size is only known at evaluation). Two different fixed sizes greater than `1` at
/// the same position cannot be unified.
///
/// An empty input (or only scalar inputs) results in a scalar shape.
pub fn max_shape<'a, I>(shapes: I) -> Result<Vec<Dim>, ShapeError>
where
    I: IntoIterator<Item = &'a [Dim]>,
{
    let mut result: Vec<Dim> = Vec::new();
    for shape in shapes {
        if shape.len() > result.len() {
            let mut padded = vec![Dim::Fixed(1); shape.len() - result.len()];
            padded.append(&mut result);
            result = padded;
        }
        let offset = result.len() - shape.len();
        for (i, dim) in shape.iter().enumerate() {
            let position = offset + i;
            result[position] = unify(result[position], *dim, position)?;
        }
    }
    Ok(result)
}

fn unify(left: Dim, right: Dim, position: usize) -> Result<Dim, ShapeError> {
    if left.is_unit() {
        return Ok(right);
    }
    if right.is_unit() {
        return Ok(left);
    }
    match (left, right) {
        (Dim::Var, _) | (_, Dim::Var) => Ok(Dim::Var),
        (Dim::Fixed(a), Dim::Fixed(b)) if a == b => Ok(left),
        _ => Err(ShapeError::Mismatch {
            left,
            right,
            position,
        }),
    }
}
