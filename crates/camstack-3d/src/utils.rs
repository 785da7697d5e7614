/// Utility function to convert a 3D array to a faer column vector.
pub fn array3_to_faer_col(array: &[f64; 3]) -> faer::ColRef<'_, f64> {
    faer::col::from_slice(array.as_slice())
}

/// Utility function to convert a 3x3 array to a faer matrix 3x3.
pub fn array33_to_faer_mat33(array: &[[f64; 3]; 3]) -> faer::MatRef<'_, f64> {
    let array_slice =
        unsafe { std::slice::from_raw_parts(array.as_ptr() as *const f64, array.len() * 3) };
    faer::mat::from_row_major_slice(array_slice, 3, 3)
}
