use crate::domain::error::DomainError;

pub const VECTOR_DIMENSIONS: usize = 768;

pub fn ensure_dimension(vector: &[f32]) -> Result<(), DomainError> {
    if vector.len() != VECTOR_DIMENSIONS {
        return Err(DomainError::DimensionMismatch {
            expected: VECTOR_DIMENSIONS,
            actual: vector.len(),
        });
    }
    Ok(())
}
