mod json_api;
