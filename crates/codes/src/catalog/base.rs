//! Codes owned by the platform core (module offset 20000).

use crate::classification::Classification;
use crate::code::ModuleOffset;

const MODULE: ModuleOffset = ModuleOffset::CORE;

pub const OFFSET: i32 = MODULE.base(Classification::ParameterError);
pub const OFFSET_DENIED: i32 = MODULE.base(Classification::Denied);
pub const OFFSET_TIMEOUT: i32 = MODULE.base(Classification::Timeout);
pub const OFFSET_VALIDATION_ERROR: i32 = MODULE.base(Classification::ValidationError);
pub const OFFSET_LOGIC_ERROR: i32 = MODULE.base(Classification::InternalLogicError);
pub const OFFSET_DB_ERROR: i32 = MODULE.base(Classification::DatabaseError);

/// An OK code: the login was correct and must be recorded, the client asks for a new password.
pub const PASSWORD_EXPIRED: i32 = 208;

/// Base of the HTTP passthrough range; `HTTP_ERROR + status` for status 0..=999.
pub const HTTP_ERROR: i32 = OFFSET_VALIDATION_ERROR + 8000;

/// Highest status that fits the HTTP passthrough range.
pub const HTTP_STATUS_MAX: u16 = 999;

/// Returns the code transporting an upstream HTTP status.
///
/// `status` must not exceed [`HTTP_STATUS_MAX`]; see [`checked_http_error`].
pub const fn http_error(status: u16) -> i32 {
	debug_assert!(status <= HTTP_STATUS_MAX, "HTTP status outside the passthrough range");
	HTTP_ERROR + status as i32
}

/// Returns the code transporting an upstream HTTP status, or `None` above [`HTTP_STATUS_MAX`].
pub const fn checked_http_error(status: u16) -> Option<i32> {
	if status > HTTP_STATUS_MAX {
		return None;
	}
	Some(HTTP_ERROR + status as i32)
}

pub const MSG_REQUEST_STILL_PROCESSING: &str =
	"Duplicate request detected - other thread still processing";
pub const MSG_SHUTDOWN_IN_PROGRESS: &str =
	"Server shutdown initiated, no more requests will be served - try again later";
pub const MSG_JWT_INCOMPLETE: &str = "The JWT is missing some required data";
pub const MSG_JWT_EXPIRED: &str = "The JWT is no longer valid, please obtain a new one";

code_catalog! {
	/// Core code definitions.
	pub const DEFS;

	INVALID_CRUD_COMMAND = OFFSET + 1 => "Attempted to use an invalid or unimplemented CRUD command";
	RECORD_ALREADY_EXISTS = OFFSET + 2 => "Attempted to create a record which already exists";
	RECORD_DOES_NOT_EXIST = OFFSET + 3 => "Attempted to access a record which does not exist";
	RECORD_INACTIVE = OFFSET + 4 => "Attempted to run transactions on deactivated (logically deleted) masterdata";
	MALFORMED_REQUEST_PARAMETER_NAME = OFFSET + 5 => "The class name of the request parameters did not end with ...Request";
	SERVICE_CLASS_NOT_FOUND = OFFSET + 6 => "Could not load service class. Configuration or classpath problem?";
	INVALID_REQUEST_PARAMETER_TYPE = OFFSET + 8 => "The class of the request parameters did not have the expected inheritance";
	TENANT_NOT_EXISTING = OFFSET + 10 => "Tenant is not existing";
	TENANT_INACTIVE = OFFSET + 11 => "Tenant is inactive";
	APP_USER_NOT_EXISTING = OFFSET + 12 => "App user is not existing";
	APP_USER_INACTIVE = OFFSET + 13 => "App user is inactive";
	APP_USER_TENANT_PERMISSION = OFFSET + 14 => "App user tenant has no permission for this tenant";
	TOO_MANY_RECORDS = OFFSET + 15 => "Too many records";
	CANT_OPEN_SESSION = OFFSET + 16 => "An attempt to open a service session failed with exception";
	CANT_CLOSE_SESSION = OFFSET + 17 => "An attempt to close a service session failed with exception";
	SESSION_OPEN_CLOSE_SEQUENCE_ERROR = OFFSET_LOGIC_ERROR + 18 => "Attempt to reopen an already open session or to close a closed one";
	MISSING_PARAMETER = OFFSET + 19 => "A request did not supply a required parameter";
	APP_USER_WRONG_AUTH_METHOD = OFFSET + 20 => "Authentication method not allowed for this user";
	APP_USER_X500_AUTH_FAILED = OFFSET + 21 => "X509 certificate's DN did not match";
	JTA_EXCEPTION = OFFSET_DB_ERROR + 22 => "Transaction handling error";
	ILLEGAL_CONFIG_ITEM = OFFSET + 23 => "A configuration item was corrupt or not usable";
	ENTITY_KEY_EXCEPTION = OFFSET + 24 => "Could not extract the key of an entity. Possibly incorrect enum token";
	ENTITY_DATA_MAPPING_EXCEPTION = OFFSET + 25 => "Exception mapping from entity data to DTO. Possibly invalid enum token";
	RESPONSE_VALIDATION_ERROR = OFFSET_VALIDATION_ERROR + 26 => "Constructed a response which is invalid";
	REQUEST_VALIDATION_ERROR = OFFSET_VALIDATION_ERROR + 27 => "Received request parameters which don't satisfy the interface definition";
	WRITE_ACCESS_ONLY_CURRENT_TENANT = OFFSET + 28 => "Creation and update of records only allowed for current tenant";
	READ_ACCESS_ONLY_CURRENT_TENANT = OFFSET + 29 => "Access to other tenant's records is not allowed";
	NOT_CURRENT_RECORD_OPTIMISTIC_LOCKING = OFFSET_DENIED + 30 => "Not updating record because someone else has modified it already. Please reread and retry";
	ILLEGAL_REQUEST_PARAMETER = OFFSET + 31 => "The supplied request parameter class cannot be instantiated";
	REQUEST_HANDLER_NOT_FOUND = OFFSET_LOGIC_ERROR + 32 => "There is no request handler for the request parameter class";
	UNIQUE_CONSTRAINT_VIOLATION = OFFSET + 33 => "A unique constraint would be violated";
	SESSION_NOT_OPENED = OFFSET_LOGIC_ERROR + 34 => "Attempted to execute a request on a session which was not opened (or closed already)";
	SESSION_OPEN_ERROR = OFFSET + 35 => "Attempted to execute a request on a session which was not opened successfully";
	REF_RESOLVER_REQUEST_PARAMETER = OFFSET_LOGIC_ERROR + 36 => "Cross module resolver was called with a missing parameter";
	BAD_TIME_SLICE = OFFSET + 37 => "The time slice should allow an integral number of runs per day, i.e. be a divisor of 86400";
	FIND_ON_NULL_KEY = OFFSET_LOGIC_ERROR + 38 => "Attempt to find a record with a null for ID";
	NOT_REQUEST_PARAMETERS = OFFSET + 39 => "Object is not of type RequestParameters";
	T9T_ACCESS_DENIED = OFFSET_DENIED + 40 => "Access denied, reason undisclosed for security reasons, see server logs";
	WRITE_ACCESS_NOT_FOUND_PROBABLY_OTHER_TENANT = OFFSET + 41 => "Record for update not found, probably due to existing one in different tenant";
	COULD_NOT_ACQUIRE_LOCK = OFFSET_TIMEOUT + 42 => "Could not acquire lock on object within allowed time";
	ILLEGAL_CHARACTER = OFFSET + 43 => "An illegal character has been identified in a string field of the request";

	STALLED_LOG_WRITER = OFFSET_TIMEOUT + 50 => "Failed to write log, log writer thread crashed?";
	REQUEST_HANDLER_RETURNED_NULL = OFFSET_LOGIC_ERROR + 51 => "A request handler returned a null response";
	SHUTDOWN_IN_PROGRESS = OFFSET_TIMEOUT + 52 => MSG_SHUTDOWN_IN_PROGRESS;
	CANNOT_CLOSE_SINK = OFFSET_DB_ERROR + 55 => "Exception while closing data sink";

	OPTIMISTIC_LOCKING_EXCEPTION = OFFSET_DB_ERROR + 94 => "Optimistic locking exception";
	REQUEST_PARAMETER_BAD_INHERITANCE = OFFSET + 95 => "The supplied request parameter class does not inherit the expected superclass";
	TRANSACTION_RETRY_REQUEST = OFFSET_DB_ERROR + 96 => "Additional attempt to run the operation is required";
	GENERAL_EXCEPTION_CENTRAL = OFFSET_LOGIC_ERROR + 97 => "Unhandled general exception in central message processing";
	GENERAL_EXCEPTION = OFFSET_LOGIC_ERROR + 98 => "Unhandled general exception";
	SELECT_INSERT_SELECT_ERROR = OFFSET_LOGIC_ERROR + 99 => "Subsequent failure of SELECT, INSERT, SELECT for the same key";

	MISSING_KEY_PARAMETER = OFFSET + 100 => "CRUD request did not supply required key parameter";
	MISSING_DATA_PARAMETER = OFFSET + 101 => "CRUD request did not supply required data parameter";
	EXTRA_KEY_PARAMETER = OFFSET + 102 => "CRUD request sent with superfluous key parameter";
	EXTRA_DATA_PARAMETER = OFFSET + 103 => "CRUD request sent with superfluous data parameter";
	MISSING_VERSION_PARAMETER = OFFSET + 104 => "CRUD request did not supply required version parameter";
	FIELD_MAY_NOT_BE_CHANGED = OFFSET + 105 => "A field may not be updated to a different value";
	ONLY_ONE_ACTIVE_ALLOWED = OFFSET + 106 => "Inserting the record would create more than one active row with the same key value";

	MISSING_CONFIGURATION = OFFSET + 107 => "No active configuration record found";
	INVALID_CONFIGURATION = OFFSET + 108 => "Configuration was done incorrectly";
	NOT_YET_IMPLEMENTED = OFFSET + 109 => "The requested functionality has not yet been implemented";

	UNRECOGNIZED_FILTER_CRITERIA = OFFSET + 110 => "Search supplied with a filter criteria which is not recognized";
	INVALID_FILTER_PARAMETERS = OFFSET + 111 => "A filter has been provided with some parameters problem";
	UNDERSPECIFIED_FILTER_PARAMETERS = OFFSET + 112 => "A filter has been provided with underspecified parameters (all null)";
	OVERSPECIFIED_FILTER_PARAMETERS = OFFSET + 113 => "A filter has been provided with overspecified parameters (contradicting conditions)";
	RERUN_NOT_APPLICABLE_RET = OFFSET + 114 => "Rerun of request not applicable due to successful return code";
	RERUN_NOT_APPLICABLE_DONE = OFFSET + 115 => "Rerun of request not applicable, because already done";
	CRUD_BOTH_KEYS_MISMATCH = OFFSET + 116 => "CRUD request supplied both keys, but they refer to different records";
	CRUD_NATURAL_KEY_MISSING = OFFSET + 117 => "CRUD request did not supply the natural key";
	RERUN_NOT_POSSIBLE_NO_RECORDED_REQUEST = OFFSET + 118 => "Rerun of request not possible, parameters have not been recorded";
	NO_LONGER_SUPPORTED = OFFSET + 119 => "The requested functionality is no longer supported";

	RESOLVE_ACCESS = OFFSET + 120 => "Key resolver access problem";
	RESOLVE_PARAMETER = OFFSET + 121 => "Illegal parameter in key resolver";
	RESOLVE_BAD_CLASS = OFFSET + 122 => "Bad class passed to key resolver";
	ERROR_FILLING_RESTRICTION_CACHE = OFFSET + 123 => "Exception while filling the restriction cache";

	UNRECOGNIZED_SORT_PARAMETER = OFFSET + 130 => "Passed sorting parameter is unknown";
	ENUM_MAPPING = OFFSET + 131 => "Cannot map enum instance";
	NOT_AN_ENUM = OFFSET_LOGIC_ERROR + 132 => "Not an enum";
	NOT_AN_XENUM = OFFSET_LOGIC_ERROR + 133 => "Not an xenum";
	NOT_AN_ENUMSET = OFFSET_LOGIC_ERROR + 134 => "Not an enumset";
	NOT_AN_XENUMSET = OFFSET_LOGIC_ERROR + 135 => "Not an xenumset";
	MALFORMATTED_FIELDNAME = OFFSET_LOGIC_ERROR + 136 => "Badly formatted field name: array index not of form [ (digits) ]";
	NOT_ENUM_INSTANCE = OFFSET_LOGIC_ERROR + 137 => "enum(set) does not have requested instance name";
	TOO_HIGH_RESULT_SIZE_FOR_SORTING = OFFSET_LOGIC_ERROR + 138 => "Too high result size for sorting";

	JDBC_BAD_TYPE_RETURNED = OFFSET_DB_ERROR + 150 => "Sequence query returned a type which cannot be processed (yet)";
	JDBC_NO_RESULT_RETURNED = OFFSET_DB_ERROR + 151 => "No result returned from sequence query";
	JDBC_GENERAL_SQL = OFFSET_DB_ERROR + 152 => "General SQL exception when trying to obtain next sequence value";
	JDBC_UNKNOWN_DIALECT = OFFSET_DB_ERROR + 153 => "Database dialect not yet implemented";

	USER_NOT_FOUND = OFFSET + 200 => "User not found";
	TENANT_NOT_FOUND = OFFSET + 201 => "Tenant not found";
	USER_INACTIVE = OFFSET + 202 => "User is inactive";
	USER_NOT_ALLOWED_TO_ACCESS_WITH_PW = OFFSET + 203 => "User is not allowed to authenticate with a password";
	USER_STATUS_NOT_FOUND = OFFSET + 204 => "User status not found";
	ACCOUNT_TEMPORARILY_FROZEN = OFFSET + 205 => "Account is temporarily frozen";
	PASSWORD_NOT_FOUND = OFFSET + 206 => "Password not found";
	PASSWORD_EXPIRED_DUE_TO_USER_INACTIVITY = OFFSET + 207 => "Password expired due to user inactivity";
	WRONG_PASSWORD = OFFSET + 209 => "Wrong password";
	NEW_PASSWORD_MATCHES_ONE_OF_THE_LAST = OFFSET + 210 => "New password matches one of the recently used ones";
	NEW_PASSWORD_MATCHES_ONE_AND_CANT_BE_REUSED_YET = OFFSET + 211 => "New password matches an old one which cannot be reused yet";
	ROLE_NOT_FOUND = OFFSET + 212 => "Role not found";
	CANNOT_RESET_PASSWORD_NO_EMAIL_SET_FOR_USER = OFFSET + 213 => "Cannot reset password, no email address stored for user";
	CANNOT_RESET_PASSWORD_PROVIDED_EMAIL_DOESNT_MATCH_STORED_ONE = OFFSET + 214 => "Cannot reset password, provided email does not match the stored one";
	INCORRECT_RESPONSE_CLASS = OFFSET_LOGIC_ERROR + 215 => "The result class was not of the expected type";
	RESTRICTED_ACCESS = OFFSET_DENIED + 216 => "Restricted access";
	ACCESS_DENIED = OFFSET_DENIED + 217 => "Access denied";
	NO_SUITABLE_AUTHENTICATION_PROVIDER_FOUND = OFFSET_LOGIC_ERROR + 218 => "No suitable authentication provider found";
	GENERAL_AUTH_PROBLEM = OFFSET + 219 => "General authentication problem";

	FILE_PATH_PREFIX_NOT_AVAILABLE = OFFSET + 250 => "Default file path prefix is not defined";
	UNKNOWN_SYSTEM_PROPERTY_USER_HOME = OFFSET + 251 => "user.home property is not set";
	UNKNOWN_SYSTEM_PROPERTY_USER_NAME = OFFSET + 252 => "user.name property is not set";

	FILE_NOT_FOUND_FOR_DOWNLOAD = OFFSET + 300 => "File not found for download";
	BAD_REMOTE_RESPONSE = OFFSET_TIMEOUT + 304 => "Bad response from remote system";
	UPSTREAM_NULL_RESPONSE = OFFSET_TIMEOUT + 310 => "Received no response from upstream";
	UPSTREAM_BAD_RESPONSE = OFFSET_TIMEOUT + 311 => "Received a response of bad type, expected ServiceResponse";
	UPSTREAM_BAD_MEDIA_TYPE = OFFSET_TIMEOUT + 312 => "Bad media type for uplink configured";
	REQUEST_STILL_PROCESSING = OFFSET_TIMEOUT + 333 => MSG_REQUEST_STILL_PROCESSING;

	REF_RESOLVER_WRONG_RESPONSE_TYPE = OFFSET + 350 => "Cross module resolver returned a response of wrong type";
	ILE_MISSING_DEPENDENCY = OFFSET_LOGIC_ERROR + 351 => "A required dependency is missing";

	NOT_AUTHENTICATED = OFFSET + 401 => "Not authenticated";
	NOT_AUTHORIZED = OFFSET + 403 => "Not authorized to perform this operation";
	NOT_AUTHORIZED_WRONG_METHOD = OFFSET + 404 => "Request not allowed for this authentication method";
	JWT_TIMING = OFFSET_LOGIC_ERROR + 405 => "The JWT has implausible time information";
	JWT_INCOMPLETE = OFFSET_LOGIC_ERROR + 406 => MSG_JWT_INCOMPLETE;
	JWT_EXPIRED = OFFSET_DENIED + 407 => MSG_JWT_EXPIRED;

	ILE_REQUIRED_PARAMETER_IS_NULL = OFFSET_LOGIC_ERROR + 800 => "A required parameter has not been supplied";
	ILE_RESULT_SET_WRONG_SIZE = OFFSET_LOGIC_ERROR + 801 => "More result records retrieved than should be possible through table constraints. DB setup problem?";

	INVALID_EVENT_TYPE = OFFSET + 980 => "Can't handle this type of event";
	THREAD_INTERRUPTED = OFFSET_TIMEOUT + 991 => "The thread was interrupted (got a termination signal)";
	UNSUPPORTED_OPERATION = OFFSET + 992 => "The requested operation is not supported";
	UNSUPPORTED_OPERAND = OFFSET + 993 => "The provided operand or parameter is not supported";

	HTTP_BAD_REQUEST = http_error(400) => "Bad request";
	HTTP_NOT_AUTHORIZED = http_error(401) => "Not authorized";
	HTTP_FORBIDDEN = http_error(403) => "Forbidden";
	HTTP_UNSUPPORTED_MEDIA_TYPE = http_error(415) => "Mediatype not supported";
	HTTP_SERVER_ERROR = http_error(500) => "Server error";
}
