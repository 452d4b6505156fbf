// Draft claim fields, named as the form fields are
pub mod session_keys {
    pub const CATEGORY: &str = "category";
    pub const CLAIM_FOR: &str = "claimFor";
    pub const PHYSIO_TYPE: &str = "physioType";
    pub const AMOUNT: &str = "amount";
    pub const PROVIDER_NAME: &str = "providerName";
    pub const SERVICE_DATE: &str = "serviceDate";
    pub const RECEIPTS: &str = "receipts";
    /// Coverage prediction computed when the details form is confirmed
    pub const ESTIMATE: &str = "estimate";
    /// Ledger id of the claim filed from this draft
    pub const SUBMITTED_CLAIM_ID: &str = "submittedClaimId";

    pub const DRAFT: &[&str] = &[
        CATEGORY,
        CLAIM_FOR,
        PHYSIO_TYPE,
        AMOUNT,
        PROVIDER_NAME,
        SERVICE_DATE,
        RECEIPTS,
        ESTIMATE,
        SUBMITTED_CLAIM_ID,
    ];
}
