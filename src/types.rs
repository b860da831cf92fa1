/// Numeric service category identifier.
/// Examples: `2`, `22`
pub type ServiceCode = u32;
/// Human-readable service category name.
/// Example: `Laterne defekt`
pub type ServiceName = String;
/// Raw, unparsed code field as it appeared in the input.
/// Examples: `99`, `21.0`, ` 7`
pub type RawCode = String;
/// Category label attached to labeled texts (news path).
/// Examples: `business`, `sport`
pub type Label = String;
/// Token produced by the standardization tokenizer.
/// Examples: `Drahtesel`, `und`
pub type Token = String;
/// Canonical token a synonym maps onto.
/// Examples: `Fahrrad`, `Müll`
pub type CanonicalToken = String;
