//! Positional request linearization and the shipped request catalog.
//!
//! Array-style remote calls identify arguments by position, not by name. A
//! request type declares its payload fields as a registration-time table
//! (`pack::record`); linearization prepends the computed `group.method` name
//! and flattens the present field values in declaration order. Each catalog
//! type must keep optional fields trailing, since an absent interior field
//! would shift every later argument one position left on the receiving side.

use std::io::Write;

use crate::pack::encode::encode_value;
use crate::pack::error::Result;
use crate::pack::record::{FieldSpec, Record, RecordSpec, RecordType, present_field_values};
use crate::pack::value::WireValue;

/// A structured record that linearizes into a positional remote call.
///
/// `group` and `method` are reserved accessors kept out of the field table;
/// they contribute only the computed method name at payload position zero.
pub trait RpcRequest: Record {
	/// Method group, the prefix of the wire method name.
	fn group(&self) -> &'static str;
	/// Method name within the group.
	fn method(&self) -> &'static str;

	/// Computed wire method name, `"{group}.{method}"`.
	fn method_name(&self) -> String {
		format!("{}.{}", self.group(), self.method())
	}
}

/// Flattens a request into its positional payload: the method name followed
/// by each present field value in declaration order.
///
/// Absent fields are dropped with no null placeholder. Only trailing fields
/// may legitimately be absent; that is a precondition on the request type's
/// field table (`record::optional_fields_are_trailing`), not something this
/// function can verify against a single instance.
pub fn linearize<R: RpcRequest + ?Sized>(request: &R) -> Vec<WireValue<'_>> {
	let mut payload = Vec::with_capacity(1 + request.field_count());
	payload.push(WireValue::Str(request.method_name().into()));
	payload.extend(present_field_values(request));
	payload
}

/// Encodes the linearized payload as one wire array.
pub fn encode_request<W: Write, R: RpcRequest + ?Sized>(out: &mut W, request: &R) -> Result<()> {
	encode_value(out, &WireValue::Seq(linearize(request)))
}

/// Encodes the linearized payload into a fresh byte buffer.
pub fn encode_request_to_vec<R: RpcRequest + ?Sized>(request: &R) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	encode_request(&mut out, request)?;
	Ok(out)
}

fn str_field(text: &str) -> Option<WireValue<'static>> {
	Some(WireValue::Str(text.into()))
}

/// Credential handshake, `auth.login`.
#[derive(Debug)]
pub struct AuthLoginRequest {
	/// Account name to authenticate as.
	pub username: String,
	/// Account password.
	pub password: String,
}

fn auth_login_username(req: &AuthLoginRequest) -> Option<WireValue<'_>> {
	str_field(&req.username)
}

fn auth_login_password(req: &AuthLoginRequest) -> Option<WireValue<'_>> {
	str_field(&req.password)
}

static AUTH_LOGIN_FIELDS: [FieldSpec<AuthLoginRequest>; 2] = [
	FieldSpec { name: "username", index: 0, optional: false, get: auth_login_username },
	FieldSpec { name: "password", index: 1, optional: false, get: auth_login_password },
];

static AUTH_LOGIN_SPEC: RecordSpec<AuthLoginRequest> =
	RecordSpec { name: "auth.login", fields: &AUTH_LOGIN_FIELDS };

impl RecordType for AuthLoginRequest {
	fn spec() -> &'static RecordSpec<Self> {
		&AUTH_LOGIN_SPEC
	}
}

impl RpcRequest for AuthLoginRequest {
	fn group(&self) -> &'static str {
		"auth"
	}

	fn method(&self) -> &'static str {
		"login"
	}
}

/// Session teardown, `auth.logout`.
#[derive(Debug)]
pub struct AuthLogoutRequest {
	/// Session token authorizing the call.
	pub token: String,
	/// Token of the session being terminated.
	pub logout_token: String,
}

fn auth_logout_token(req: &AuthLogoutRequest) -> Option<WireValue<'_>> {
	str_field(&req.token)
}

fn auth_logout_target(req: &AuthLogoutRequest) -> Option<WireValue<'_>> {
	str_field(&req.logout_token)
}

static AUTH_LOGOUT_FIELDS: [FieldSpec<AuthLogoutRequest>; 2] = [
	FieldSpec { name: "token", index: 0, optional: false, get: auth_logout_token },
	FieldSpec { name: "logout_token", index: 1, optional: false, get: auth_logout_target },
];

static AUTH_LOGOUT_SPEC: RecordSpec<AuthLogoutRequest> =
	RecordSpec { name: "auth.logout", fields: &AUTH_LOGOUT_FIELDS };

impl RecordType for AuthLogoutRequest {
	fn spec() -> &'static RecordSpec<Self> {
		&AUTH_LOGOUT_SPEC
	}
}

impl RpcRequest for AuthLogoutRequest {
	fn group(&self) -> &'static str {
		"auth"
	}

	fn method(&self) -> &'static str {
		"logout"
	}
}

/// Opens a console session, `console.create`.
#[derive(Debug)]
pub struct ConsoleCreateRequest {
	/// Session token authorizing the call.
	pub token: String,
}

fn console_create_token(req: &ConsoleCreateRequest) -> Option<WireValue<'_>> {
	str_field(&req.token)
}

static CONSOLE_CREATE_FIELDS: [FieldSpec<ConsoleCreateRequest>; 1] =
	[FieldSpec { name: "token", index: 0, optional: false, get: console_create_token }];

static CONSOLE_CREATE_SPEC: RecordSpec<ConsoleCreateRequest> =
	RecordSpec { name: "console.create", fields: &CONSOLE_CREATE_FIELDS };

impl RecordType for ConsoleCreateRequest {
	fn spec() -> &'static RecordSpec<Self> {
		&CONSOLE_CREATE_SPEC
	}
}

impl RpcRequest for ConsoleCreateRequest {
	fn group(&self) -> &'static str {
		"console"
	}

	fn method(&self) -> &'static str {
		"create"
	}
}

/// Tears down a console session, `console.destroy`.
#[derive(Debug)]
pub struct ConsoleDestroyRequest {
	/// Session token authorizing the call.
	pub token: String,
	/// Console to destroy.
	pub console_id: String,
}

fn console_destroy_token(req: &ConsoleDestroyRequest) -> Option<WireValue<'_>> {
	str_field(&req.token)
}

fn console_destroy_id(req: &ConsoleDestroyRequest) -> Option<WireValue<'_>> {
	str_field(&req.console_id)
}

static CONSOLE_DESTROY_FIELDS: [FieldSpec<ConsoleDestroyRequest>; 2] = [
	FieldSpec { name: "token", index: 0, optional: false, get: console_destroy_token },
	FieldSpec { name: "console_id", index: 1, optional: false, get: console_destroy_id },
];

static CONSOLE_DESTROY_SPEC: RecordSpec<ConsoleDestroyRequest> =
	RecordSpec { name: "console.destroy", fields: &CONSOLE_DESTROY_FIELDS };

impl RecordType for ConsoleDestroyRequest {
	fn spec() -> &'static RecordSpec<Self> {
		&CONSOLE_DESTROY_SPEC
	}
}

impl RpcRequest for ConsoleDestroyRequest {
	fn group(&self) -> &'static str {
		"console"
	}

	fn method(&self) -> &'static str {
		"destroy"
	}
}

/// Drains buffered console output, `console.read`.
#[derive(Debug)]
pub struct ConsoleReadRequest {
	/// Session token authorizing the call.
	pub token: String,
	/// Console to read from.
	pub console_id: String,
}

fn console_read_token(req: &ConsoleReadRequest) -> Option<WireValue<'_>> {
	str_field(&req.token)
}

fn console_read_id(req: &ConsoleReadRequest) -> Option<WireValue<'_>> {
	str_field(&req.console_id)
}

static CONSOLE_READ_FIELDS: [FieldSpec<ConsoleReadRequest>; 2] = [
	FieldSpec { name: "token", index: 0, optional: false, get: console_read_token },
	FieldSpec { name: "console_id", index: 1, optional: false, get: console_read_id },
];

static CONSOLE_READ_SPEC: RecordSpec<ConsoleReadRequest> =
	RecordSpec { name: "console.read", fields: &CONSOLE_READ_FIELDS };

impl RecordType for ConsoleReadRequest {
	fn spec() -> &'static RecordSpec<Self> {
		&CONSOLE_READ_SPEC
	}
}

impl RpcRequest for ConsoleReadRequest {
	fn group(&self) -> &'static str {
		"console"
	}

	fn method(&self) -> &'static str {
		"read"
	}
}

/// Feeds input to a console, `console.write`.
#[derive(Debug)]
pub struct ConsoleWriteRequest {
	/// Session token authorizing the call.
	pub token: String,
	/// Console to write to.
	pub console_id: String,
	/// Text to feed, newline included if a command should run.
	pub data: String,
}

fn console_write_token(req: &ConsoleWriteRequest) -> Option<WireValue<'_>> {
	str_field(&req.token)
}

fn console_write_id(req: &ConsoleWriteRequest) -> Option<WireValue<'_>> {
	str_field(&req.console_id)
}

fn console_write_data(req: &ConsoleWriteRequest) -> Option<WireValue<'_>> {
	str_field(&req.data)
}

static CONSOLE_WRITE_FIELDS: [FieldSpec<ConsoleWriteRequest>; 3] = [
	FieldSpec { name: "token", index: 0, optional: false, get: console_write_token },
	FieldSpec { name: "console_id", index: 1, optional: false, get: console_write_id },
	FieldSpec { name: "data", index: 2, optional: false, get: console_write_data },
];

static CONSOLE_WRITE_SPEC: RecordSpec<ConsoleWriteRequest> =
	RecordSpec { name: "console.write", fields: &CONSOLE_WRITE_FIELDS };

impl RecordType for ConsoleWriteRequest {
	fn spec() -> &'static RecordSpec<Self> {
		&CONSOLE_WRITE_SPEC
	}
}

impl RpcRequest for ConsoleWriteRequest {
	fn group(&self) -> &'static str {
		"console"
	}

	fn method(&self) -> &'static str {
		"write"
	}
}

/// Launches a module, `module.execute`.
#[derive(Debug)]
pub struct ModuleExecuteRequest {
	/// Session token authorizing the call.
	pub token: String,
	/// Module kind, e.g. `exploit` or `auxiliary`.
	pub module_type: String,
	/// Full module path within its kind.
	pub module_name: String,
	/// Datastore options for the run; omitted entirely when unset.
	pub options: Option<Vec<(String, String)>>,
}

fn module_execute_token(req: &ModuleExecuteRequest) -> Option<WireValue<'_>> {
	str_field(&req.token)
}

fn module_execute_type(req: &ModuleExecuteRequest) -> Option<WireValue<'_>> {
	str_field(&req.module_type)
}

fn module_execute_name(req: &ModuleExecuteRequest) -> Option<WireValue<'_>> {
	str_field(&req.module_name)
}

fn module_execute_options(req: &ModuleExecuteRequest) -> Option<WireValue<'_>> {
	req.options.as_ref().map(|options| {
		WireValue::Map(
			options
				.iter()
				.map(|(key, value)| (WireValue::Str(key.as_str().into()), WireValue::Str(value.as_str().into())))
				.collect(),
		)
	})
}

static MODULE_EXECUTE_FIELDS: [FieldSpec<ModuleExecuteRequest>; 4] = [
	FieldSpec { name: "token", index: 0, optional: false, get: module_execute_token },
	FieldSpec { name: "module_type", index: 1, optional: false, get: module_execute_type },
	FieldSpec { name: "module_name", index: 2, optional: false, get: module_execute_name },
	FieldSpec { name: "options", index: 3, optional: true, get: module_execute_options },
];

static MODULE_EXECUTE_SPEC: RecordSpec<ModuleExecuteRequest> =
	RecordSpec { name: "module.execute", fields: &MODULE_EXECUTE_FIELDS };

impl RecordType for ModuleExecuteRequest {
	fn spec() -> &'static RecordSpec<Self> {
		&MODULE_EXECUTE_SPEC
	}
}

impl RpcRequest for ModuleExecuteRequest {
	fn group(&self) -> &'static str {
		"module"
	}

	fn method(&self) -> &'static str {
		"execute"
	}
}
