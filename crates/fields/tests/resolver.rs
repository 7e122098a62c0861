use pretty_assertions::assert_eq;
use rstest::rstest;
use t9t_fields::{
	CrudViewModel, FieldConventions, FieldDescriptor, FieldKind, FieldResolver, SchemaError, SchemaProvider,
	StaticSchema, Variant, VariantKind, add_prefix, remove_prefix, strip_indexes,
};

static ADDRESS: StaticSchema = StaticSchema {
	name: "Address",
	fields: &[
		FieldDescriptor::new("street", FieldKind::Text),
		FieldDescriptor::new("city", FieldKind::Text).required(),
	],
};

static ORDER_LINE: StaticSchema = StaticSchema {
	name: "OrderLine",
	fields: &[
		FieldDescriptor::new("sku", FieldKind::Text).required(),
		FieldDescriptor::new("quantity", FieldKind::Int),
		FieldDescriptor::new("price", FieldKind::Decimal),
	],
};

static CUSTOMER: StaticSchema = StaticSchema {
	name: "Customer",
	fields: &[
		FieldDescriptor::new("name", FieldKind::Text).required(),
		FieldDescriptor::new("status", FieldKind::Enum),
		FieldDescriptor::new("address", FieldKind::Object(&ADDRESS)),
		FieldDescriptor::new("lines", FieldKind::Object(&ORDER_LINE)).list(),
		FieldDescriptor::new("tags", FieldKind::Text).list(),
	],
};

static TRACKING: StaticSchema = StaticSchema {
	name: "FullTracking",
	fields: &[
		FieldDescriptor::new("cTimestamp", FieldKind::Instant).required(),
		FieldDescriptor::new("cAppUserId", FieldKind::Text),
		FieldDescriptor::new("cProcessRef", FieldKind::Long),
		FieldDescriptor::new("mTimestamp", FieldKind::Instant).required(),
		FieldDescriptor::new("mAppUserId", FieldKind::Text),
		FieldDescriptor::new("mProcessRef", FieldKind::Long),
		FieldDescriptor::new("version", FieldKind::Int).required(),
	],
};

#[rstest]
#[case("name", "name", FieldKind::Text)]
#[case("address.city", "city", FieldKind::Text)]
#[case("lines[2].quantity", "quantity", FieldKind::Int)]
#[case("lines.price", "price", FieldKind::Decimal)]
#[case("tags[0]", "tags", FieldKind::Text)]
fn static_schema_walks_paths(#[case] path: &str, #[case] name: &str, #[case] kind: FieldKind) {
	let field = CUSTOMER.lookup(path).unwrap();
	assert_eq!(field.name, name);
	assert_eq!(field.kind, kind);
}

#[rstest]
#[case("nickname", SchemaError::UnknownField { schema: "Customer", field: "nickname".into() })]
#[case("address.zip", SchemaError::UnknownField { schema: "Address", field: "zip".into() })]
#[case("name[0]", SchemaError::NotIndexable { schema: "Customer", field: "name" })]
#[case("lines[x].sku", SchemaError::MalformedIndex { segment: "lines[x]".into() })]
#[case("lines[1", SchemaError::MalformedIndex { segment: "lines[1".into() })]
#[case("name.first", SchemaError::NotAnObject { schema: "Customer", field: "name" })]
#[case("address..city", SchemaError::EmptySegment { path: "address..city".into() })]
#[case("", SchemaError::EmptySegment { path: String::new() })]
fn static_schema_reports_bad_paths(#[case] path: &str, #[case] expected: SchemaError) {
	assert_eq!(CUSTOMER.lookup(path).unwrap_err(), expected);
}

#[test]
fn resolver_routes_by_root_scope() {
	let resolver = FieldResolver::platform();
	let model = CrudViewModel::tracked(&CUSTOMER, &TRACKING);

	let tenant = resolver.field_definition_for_path("tenantId", &model).unwrap();
	assert_eq!(tenant.kind, FieldKind::Text);
	assert!(tenant.required);

	let version = resolver.field_definition_for_path("version", &model).unwrap();
	assert_eq!(version.kind, FieldKind::Int);

	let city = resolver.field_definition_for_path("address.city", &model).unwrap();
	assert_eq!(city.name, "city");
}

#[test]
fn plain_model_resolves_everything_against_the_dto() {
	let resolver = FieldResolver::platform();
	let model = CrudViewModel::plain(&CUSTOMER);

	assert_eq!(
		resolver.field_definition_for_path("version", &model).unwrap_err(),
		SchemaError::UnknownField {
			schema: "Customer",
			field: "version".into(),
		}
	);
	assert_eq!(resolver.field_definition_for_path("name", &model).unwrap().name, "name");
}

#[test]
fn custom_conventions_change_routing() {
	static TENANT: StaticSchema = StaticSchema {
		name: "Tenant",
		fields: &[FieldDescriptor::new("tenantRef", FieldKind::Long)],
	};
	let conventions = FieldConventions::new("tenantRef", ["version"]).unwrap();
	let resolver = FieldResolver::new(conventions, &TENANT);
	let model = CrudViewModel::tracked(&CUSTOMER, &TRACKING);

	assert_eq!(
		resolver.field_definition_for_path("tenantRef", &model).unwrap().kind,
		FieldKind::Long
	);
	assert!(resolver.field_definition_for_path("mTimestamp", &model).is_err());
}

#[test]
fn sort_column_from_instance_path() {
	// A client sorts by an element of a list; the query needs the schema path.
	let instance = "lines[4].price";
	let prefixed = add_prefix(instance);
	assert_eq!(prefixed, "data.lines[4].price");

	let schema_path = strip_indexes(remove_prefix(&prefixed)).into_owned();
	assert_eq!(schema_path, "lines.price");

	let field = CUSTOMER.lookup(&schema_path).unwrap();
	let kind = field.kind.variant_kind().unwrap();
	assert_eq!(kind, VariantKind::Num);
	assert_eq!(Variant::parse(kind, "9.99").unwrap().to_string(), "9.99");
}
