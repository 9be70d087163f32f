/// Identifier of an application user.
pub type UserId = String;
/// Identifier of a bank-link document (the internal record tying a user to a
/// linked external account).
pub type BankLinkId = String;
/// Identifier assigned to an account by the external account-data provider.
pub type ExternalAccountId = String;
/// Identifier of a financial institution at the external provider.
pub type InstitutionId = String;

/// Fixed page size used by the transaction paginator.
pub const ROWS_PER_PAGE: usize = 10;
