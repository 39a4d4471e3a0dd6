mod check_expiry;

pub use check_expiry::CheckExpiryUseCase;
