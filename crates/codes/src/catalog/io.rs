//! Codes owned by the input/output module (module offset 28000).

use crate::classification::Classification;
use crate::code::ModuleOffset;

const MODULE: ModuleOffset = ModuleOffset::IO;

pub const OFFSET: i32 = MODULE.base(Classification::ParameterError);
pub const OFFSET_DENIED: i32 = MODULE.base(Classification::Denied);

code_catalog! {
	/// IO code definitions.
	pub const DEFS;

	/// A decline, not a technical error, so the transfer status can still be written.
	NOT_TRANSFERRED = OFFSET_DENIED + 333 => "Record was not transferred";

	NO_RECORD_BASED_OUTPUT = OFFSET + 100 => "The selected output format does not support record based output";
	NO_FOLDING_SUPPORT = OFFSET + 101 => "The selected output format does not support field folding";
	IO_EXCEPTION = OFFSET + 102 => "I/O exception";
	WRONG_RECORD_TYPE = OFFSET + 103 => "Wrong record type for this data sink";
	IMPORT_FINISHED_WITH_ERRORS = OFFSET + 104 => "Import finished with errors";

	OUTPUT_FILE_IS_DIRECTORY = OFFSET + 120 => "Output file is a directory";
	OUTPUT_FILE_PATH_NOT_ABSOLUTE = OFFSET + 121 => "Output file path is not absolute";
	OUTPUT_FILE_OPEN_EXCEPTION = OFFSET + 122 => "Exception opening the output file";

	FORMAT_UNSPECIFIED = OFFSET + 230 => "No output format specified";
	FORMAT_MISMATCH = OFFSET + 231 => "Output format does not match the data sink";
	FORMAT_NO_STRUCTURED = OFFSET + 232 => "Output format does not support structured output";
	OUTPUT_FILE_EXCEPTION = OFFSET + 233 => "Exception writing the output file";
}
