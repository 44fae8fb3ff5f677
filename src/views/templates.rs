// ============================================================================
// Page templates
// ============================================================================

pub const EVENT_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
</head>
<body>
<main>
<section id="event">
<div class="header">
<h1>Event Description</h1>
<p>{{description}}</p>
</div>
<div class="details">
<div class="content">
<img src="{{image}}" alt="Event Banner" width="800" height="800">
<section class="flex-col gap-2">
<h2>Overview</h2>
<p>{{overview}}</p>
</section>
<section class="flex-col gap-2">
<h2>Details</h2>
<div class="flex row-gap-2 items-center"><img src="/icons/calendar.svg" alt="calendar" width="17" height="17"><p>{{date}}</p></div>
<div class="flex row-gap-2 items-center"><img src="/icons/clock.svg" alt="clock" width="17" height="17"><p>{{time}}</p></div>
<div class="flex row-gap-2 items-center"><img src="/icons/pin.svg" alt="pin" width="17" height="17"><p>{{location}}</p></div>
<div class="flex row-gap-2 items-center"><img src="/icons/mode.svg" alt="mode" width="17" height="17"><p>{{mode}}</p></div>
<div class="flex row-gap-2 items-center"><img src="/icons/audience.svg" alt="audience" width="17" height="17"><p>{{audience}}</p></div>
</section>
<div class="agenda">
<h2>Agenda</h2>
<ul>
{{#each agenda}}
<li>{{this}}</li>
{{/each}}
</ul>
</div>
<section class="flex-col gap-2">
<h2>About Organizer</h2>
<p>{{organizer}}</p>
</section>
<div class="flex flex-row gap-1.5 flex-wrap">
{{#each tags}}
<div class="pill">{{this}}</div>
{{/each}}
</div>
</div>
<aside class="booking">
<p class="text-lg font-semibold">Book Event</p>
</aside>
</div>
</section>
</main>
</body>
</html>
"#;

pub const NOT_FOUND_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Event not found</title>
</head>
<body>
<main>
<section id="not-found">
<h1>404</h1>
<p>This event could not be found.</p>
</section>
</main>
</body>
</html>
"#;
