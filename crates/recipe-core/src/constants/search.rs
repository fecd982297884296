// ABOUTME: Recipe search API constants: endpoint path, parameter names, page sizes
// ABOUTME: Default page sizes mirror the home, search, and category screens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default base URL of the recipe search API
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Search endpoint path relative to the base URL
pub const COMPLEX_SEARCH_PATH: &str = "recipes/complexSearch";

/// Query parameter carrying the API credential
pub const API_KEY_PARAM: &str = "apiKey";

/// Smallest page size accepted by the search endpoint
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size accepted by the search endpoint
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default number of trending recipes
pub const DEFAULT_TRENDING_LIMIT: u32 = 5;

/// Default number of latest recipes
pub const DEFAULT_LATEST_LIMIT: u32 = 5;

/// Default number of keyword search results
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Default number of recipes per category
pub const DEFAULT_CATEGORY_LIMIT: u32 = 5;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
