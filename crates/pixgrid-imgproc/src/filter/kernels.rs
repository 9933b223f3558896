/// Horizontal Sobel kernel, indexed as `[row][col]`.
pub const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical Sobel kernel, indexed as `[row][col]`.
pub const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Side length of every kernel in this module.
pub const KERNEL_SIZE: usize = 3;
