//! Built-in rule templates.
//!
//! Templates are rendered with tera and receive: `name`, `method`, `url`,
//! `date`, `type_name`, `fn_name`, `request_params`, `response_params`, `request_raw`
//! and `response_raw`. The parameter lists arrive as pretty-printed JSON text.

/// Swift rule set, the default target.
pub const SWIFT: &str = r#"You are a senior iOS engineer. Write Swift networking code for the HTTP endpoint described below.

## Endpoint
- Name: {{ name }}
- Method: {{ method }}
- Path: {{ url }}
- Type prefix: {{ type_name }}

## Output format
1. Reply with Swift source only, inside a single ```swift code block. No explanation before or after it.
2. Begin the file with this header comment:
//
//  {{ type_name }}API.swift
//
//  Created on {{ date }}.
//
3. Produce, in this order: the request model `{{ type_name }}Request`, the response model `{{ type_name }}Response`, every nested model, then an `enum {{ type_name }}API` with a `static` request function.

## Naming conventions
- Types are UpperCamelCase, properties are lowerCamelCase.
- Convert snake_case and kebab-case keys to lowerCamelCase. Whenever a property name differs from the JSON key, add a `CodingKeys` enum that maps it back.
- Every generated type starts with `{{ type_name }}`. A nested model is named `{{ type_name }}` followed by the UpperCamelCase field name, for example `data` becomes `{{ type_name }}Data`. An array of objects uses the singular form of the field name, for example `items` becomes `{{ type_name }}Item`.
- Swift keywords used as property names are wrapped in backticks.

## Type mapping
Map `field_type` to Swift as follows:
- string -> String
- number -> Int when every example value is a whole number, otherwise Double
- boolean -> Bool
- array -> [Element], where Element comes from the nested keys or from the example JSON; fall back to [String]
- object -> a nested struct
- null -> String?
- any other value -> String
A property whose `not_null` is 0 is optional (`?`). A property whose `not_null` is 1 is non-optional.
All models conform to `Codable`. Response models also conform to `Sendable`.

## Nested structure extraction
- `key` is a dotted path. The number of `.` characters is the nesting depth, and the last segment is the property name.
- Response parameters start with `body.`; drop that prefix. `body.data.accountId` is property `accountId` of the model for `data`, which itself is a property of `{{ type_name }}Response`.
- Request parameters without a dot belong to `{{ type_name }}Request` directly.
- Create one struct per object (or array of objects) and declare it after the struct that first uses it.
- Never invent fields. If a parameter list is empty, derive the structure from the matching raw example JSON instead. If that is also absent, emit an empty struct.

## Comments
- Give every property a `///` doc comment with its `description`. Omit the comment when the description is empty.
- When `value` is not empty, end that comment with `Example: <value>`.
- Give each type a one-line `///` comment that mentions the endpoint name "{{ name }}".
- Do not add any other comments.

## Request function
- Signature: `static func request(_ params: {{ type_name }}Request) async throws -> {{ type_name }}Response`.
- {{ method }} requests to "{{ url }}"; for GET send the request model as query items, otherwise encode it as the JSON body.
- Use `URLSession.shared` and `JSONDecoder`; leave the base URL as a `static let baseURL: URL` placeholder.

## Request parameters
```json
{{ request_params }}
```

## Request example
```json
{{ request_raw }}
```

## Response parameters
```json
{{ response_params }}
```

## Response example
```json
{{ response_raw }}
```
"#;

/// TypeScript rule set.
pub const TYPESCRIPT: &str = r#"You are a senior front-end engineer. Write TypeScript client code for the HTTP endpoint described below.

## Endpoint
- Name: {{ name }}
- Method: {{ method }}
- Path: {{ url }}
- Type prefix: {{ type_name }}

## Output format
1. Reply with TypeScript source only, inside a single ```typescript code block. No explanation before or after it.
2. Begin the file with the comment `// {{ type_name }} API, generated {{ date }}`.
3. Export, in this order: `interface {{ type_name }}Request`, `interface {{ type_name }}Response`, every nested interface, then `async function {{ fn_name }}(params: {{ type_name }}Request): Promise<{{ type_name }}Response>`.

## Naming conventions
- Interfaces are PascalCase and keep the JSON keys unchanged as property names.
- Nested interfaces are named `{{ type_name }}` followed by the PascalCase field name.

## Type mapping
- string -> string
- number -> number
- boolean -> boolean
- array -> Element[], inferred from nested keys or the example; fall back to unknown[]
- object -> a nested interface
- null -> null
- any other value -> string
A property whose `not_null` is 0 is optional (`?:`).

## Nested structure extraction
- `key` is a dotted path; the number of `.` characters is the nesting depth.
- Response parameters start with `body.`; drop that prefix before building interfaces.
- Never invent fields. If a parameter list is empty, use the raw example JSON instead.

## Comments
- Put a `/** description */` comment above each property that has a description, adding `Example: <value>` when `value` is present.

## Request function
- {{ method }} "{{ url }}" with `fetch`; send the request as query parameters for GET and as a JSON body otherwise.
- Throw an `Error` carrying the status code when the response is not ok.

## Request parameters
```json
{{ request_params }}
```

## Request example
```json
{{ request_raw }}
```

## Response parameters
```json
{{ response_params }}
```

## Response example
```json
{{ response_raw }}
```
"#;
